use anyhow::Result;
use ark_lore_to_sqlite::{
    cli::{Cli, Commands},
    config::{AppConfig, Settings},
    download::ensure_data_downloaded,
    logging::init_tracing,
    lookup::{CardText, LoreDb, OperatorCard},
    schema::table_names,
    ui::{Dashboard, LogUi, Ui},
    writer::{convert_to_sqlite, ConvertSummary},
};
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose, cli.log_format, cli.command.uses_tui());

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            output_db,
            locale,
            force,
            cache_dir,
            fresh,
            tui,
        } => {
            let settings = config.settings(locale, cache_dir);
            let start = Instant::now();

            let summary = if tui {
                let mut ui = Dashboard::new()?;
                let summary = sync(&settings, &output_db, force, fresh, &mut ui)?;
                ui.finish(&summary)?;
                summary
            } else {
                sync(&settings, &output_db, force, fresh, &mut LogUi::new())?
            };

            println!(
                "\nCreated {:?} ({}) from {} data in {:.1}s",
                output_db,
                summary,
                settings.locale,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Download {
            locale,
            output,
            force,
        } => {
            let settings = config.settings(locale, None);
            let path = ensure_data_downloaded(&settings, output, force, &mut LogUi::new())?;
            println!("{} tables downloaded to {:?}", settings.locale, path);
        }

        Commands::Convert {
            data_dir,
            output_db,
            locale,
            fresh,
            tui,
        } => {
            let settings = config.settings(locale, None);
            let start = Instant::now();

            let summary = if tui {
                let mut ui = Dashboard::new()?;
                let summary = convert_to_sqlite(&data_dir, &output_db, &settings, fresh, &mut ui)?;
                ui.finish(&summary)?;
                summary
            } else {
                convert_to_sqlite(&data_dir, &output_db, &settings, fresh, &mut LogUi::new())?
            };

            println!(
                "\nCreated {:?} ({}) in {:.1}s",
                output_db,
                summary,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Search { db, query, locale } => {
            let settings = config.settings(locale, None);
            search(&db, &query, &settings)?;
        }

        Commands::Org { db, query } => {
            let db = LoreDb::open(&db)?;
            match db.find_organization(&query)? {
                Some(org) => {
                    println!("{} ({})", org.name, org.id);
                    if let Some(org_type) = org.org_type {
                        println!("  type: {}", org_type);
                    }
                    if let Some(color) = org.color {
                        println!("  color: {}", color);
                    }
                    if let Some(description) = org.description {
                        println!("\n{}", description);
                    }
                    if let Some(lore) = org.lore {
                        println!("\n{}", lore);
                    }
                }
                None => println!("No organization matches {:?}", query),
            }
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

fn sync(
    settings: &Settings,
    output_db: &Path,
    force: bool,
    fresh: bool,
    ui: &mut impl Ui,
) -> Result<ConvertSummary> {
    let data_dir = ensure_data_downloaded(settings, None, force, ui)?;
    convert_to_sqlite(&data_dir, output_db, settings, fresh, ui)
}

fn search(db: &Path, query: &str, settings: &Settings) -> Result<()> {
    let db = LoreDb::open(db)?;
    let operators = db.search_operators(query)?;

    if operators.is_empty() {
        println!("No operator matches {:?}", query);
        return Ok(());
    }
    if operators.len() > 1 {
        println!("{} operators found\n", operators.len());
    }

    let text = CardText::for_locale(settings.locale);
    for op in &operators {
        println!("{}", OperatorCard::from_row(op, &settings.labels, &text));
    }

    Ok(())
}
