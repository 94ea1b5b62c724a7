pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::{TaxonomyService, TitleService};
pub use domain::{TaxonomyEntry, TaxonomyKind, Title};
