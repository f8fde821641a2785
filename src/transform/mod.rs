//! Vendor records -> display-ready rows.

pub mod locale;
pub mod operator;
pub mod organization;
pub mod resolver;
pub mod sections;
pub mod template;

pub use locale::{HandbookLabels, Locale, StatLabels};
pub use operator::{classify, AbilityStats, Candidacy, NamedText, OperatorBuilder, OperatorRow};
pub use organization::OrganizationRow;
pub use resolver::{first_present, Resolver, TeamIndex};
