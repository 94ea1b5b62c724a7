pub mod dto;
pub mod taxonomy_service;
pub mod title_service;

pub use dto::{
    CreateTaxonomyRequest, CreateTitleRequest, TaxonomyListQuery, TaxonomyResponse,
    TitleListQuery, TitleResponse, UpdateTitleRequest,
};
pub use taxonomy_service::TaxonomyService;
pub use title_service::TitleService;
