pub mod taxonomy;
pub mod title;

pub use taxonomy::{TaxonomyEntry, TaxonomyKind};
pub use title::{Title, TitleDraft, TitleFilter};
