pub mod entities;
pub mod repositories;

// Re-exports for easy access
pub use entities::{TaxonomyEntry, TaxonomyKind, Title, TitleDraft, TitleFilter};
pub use repositories::{TaxonomyRepository, TitleRepository};
