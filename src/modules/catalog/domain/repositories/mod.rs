pub mod taxonomy_repository;
pub mod title_repository;

pub use taxonomy_repository::TaxonomyRepository;
pub use title_repository::TitleRepository;
