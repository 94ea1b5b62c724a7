pub mod taxonomy_repository_impl;
pub mod title_repository_impl;

pub use taxonomy_repository_impl::TaxonomyRepositoryImpl;
pub use title_repository_impl::TitleRepositoryImpl;
