use async_trait::async_trait;

use crate::modules::catalog::domain::entities::{TaxonomyEntry, TaxonomyKind};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Entries ordered by name, optionally filtered by a name substring.
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<String>,
        page: PageRequest,
    ) -> AppResult<Page<TaxonomyEntry>>;

    async fn find_by_slug(&self, kind: TaxonomyKind, slug: &str)
        -> AppResult<Option<TaxonomyEntry>>;

    /// Entries whose slug is in `slugs`; unknown slugs are simply absent.
    async fn find_by_slugs(
        &self,
        kind: TaxonomyKind,
        slugs: &[String],
    ) -> AppResult<Vec<TaxonomyEntry>>;

    /// Slug collisions surface as a `slug` field error.
    async fn insert(&self, kind: TaxonomyKind, entry: &TaxonomyEntry) -> AppResult<TaxonomyEntry>;

    async fn delete_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<()>;
}
