use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

/// Install the global subscriber. `RUST_LOG` wins over the `-v` count.
///
/// While the full-screen display owns the terminal, events are discarded;
/// the display's log panel shows the run instead.
pub fn init_tracing(verbose: u8, format: LogFormat, tui: bool) {
    let filter = match verbose {
        0 => "ark_lore_to_sqlite=info",
        1 => "ark_lore_to_sqlite=debug",
        _ => "ark_lore_to_sqlite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tui {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::sink)
            .init();
        return;
    }

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
