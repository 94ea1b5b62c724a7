use std::sync::Arc;

use super::dto::CreateTaxonomyRequest;
use crate::log_info;
use crate::modules::access::{ensure, Action, Identity, Resource};
use crate::modules::catalog::domain::{TaxonomyEntry, TaxonomyKind, TaxonomyRepository};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::Validator;

/// Categories and genres: list, create and delete. Single entries are never
/// served on their own.
pub struct TaxonomyService {
    taxonomy_repo: Arc<dyn TaxonomyRepository>,
    validator: Arc<Validator>,
}

impl TaxonomyService {
    pub fn new(taxonomy_repo: Arc<dyn TaxonomyRepository>, validator: Arc<Validator>) -> Self {
        Self {
            taxonomy_repo,
            validator,
        }
    }

    pub async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<String>,
        page: PageRequest,
    ) -> AppResult<Page<TaxonomyEntry>> {
        let search = search.filter(|s| !s.trim().is_empty());
        self.taxonomy_repo.list(kind, search, page).await
    }

    pub async fn create(
        &self,
        identity: &Identity,
        kind: TaxonomyKind,
        request: CreateTaxonomyRequest,
    ) -> AppResult<TaxonomyEntry> {
        ensure(identity, &Resource::Catalog, Action::Create)?;

        self.validator
            .validate_name(&request.name)
            .merge(self.validator.validate_slug(&request.slug))
            .into_result()?;

        if self
            .taxonomy_repo
            .find_by_slug(kind, &request.slug)
            .await?
            .is_some()
        {
            return Err(AppError::field(
                "slug",
                format!("A {} with this slug already exists", kind),
            ));
        }

        let entry = TaxonomyEntry::new(request.name, request.slug);
        let saved = self.taxonomy_repo.insert(kind, &entry).await?;
        log_info!("Created {} '{}'", kind, saved.slug);
        Ok(saved)
    }

    pub async fn delete(&self, identity: &Identity, kind: TaxonomyKind, slug: &str) -> AppResult<()> {
        ensure(identity, &Resource::Catalog, Action::Delete)?;
        self.taxonomy_repo.delete_by_slug(kind, slug).await?;
        log_info!("Deleted {} '{}'", kind, slug);
        Ok(())
    }
}
