use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use super::dto::{CreateTitleRequest, UpdateTitleRequest};
use crate::log_info;
use crate::modules::access::{ensure, Action, Identity, Resource};
use crate::modules::catalog::domain::{
    TaxonomyKind, TaxonomyRepository, Title, TitleDraft, TitleFilter, TitleRepository,
};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::{ValidationResult, Validator};

pub struct TitleService {
    title_repo: Arc<dyn TitleRepository>,
    taxonomy_repo: Arc<dyn TaxonomyRepository>,
    validator: Arc<Validator>,
}

impl TitleService {
    pub fn new(
        title_repo: Arc<dyn TitleRepository>,
        taxonomy_repo: Arc<dyn TaxonomyRepository>,
        validator: Arc<Validator>,
    ) -> Self {
        Self {
            title_repo,
            taxonomy_repo,
            validator,
        }
    }

    pub async fn list(&self, filter: TitleFilter, page: PageRequest) -> AppResult<Page<Title>> {
        self.title_repo.list(filter, page).await
    }

    pub async fn get(&self, id: &Uuid) -> AppResult<Title> {
        self.title_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))
    }

    pub async fn create(&self, identity: &Identity, request: CreateTitleRequest) -> AppResult<Title> {
        ensure(identity, &Resource::Catalog, Action::Create)?;

        let mut result = self
            .validator
            .validate_name(&request.name)
            .merge(self.validator.validate_year(request.year));

        let category_id = match &request.category {
            Some(slug) => self.resolve_category(slug, &mut result).await?,
            None => None,
        };
        let genre_ids = self.resolve_genres(&request.genre, &mut result).await?;
        result.into_result()?;

        let draft = TitleDraft {
            name: request.name,
            year: request.year,
            description: request.description,
            category_id,
            genre_ids,
        };
        let title = self.title_repo.insert(&draft).await?;
        log_info!("Created title '{}' ({})", title.name, title.id);
        Ok(title)
    }

    /// Partial update. Omitted fields keep their stored values; a supplied
    /// genre list replaces the current one.
    pub async fn update(
        &self,
        identity: &Identity,
        id: &Uuid,
        request: UpdateTitleRequest,
    ) -> AppResult<Title> {
        ensure(identity, &Resource::Catalog, Action::Update)?;
        let current = self.get(id).await?;
        let mut draft = current.to_draft();

        let mut result = ValidationResult::valid();
        if let Some(name) = &request.name {
            result = result.merge(self.validator.validate_name(name));
        }
        if let Some(year) = request.year {
            result = result.merge(self.validator.validate_year(year));
        }
        if let Some(slug) = &request.category {
            draft.category_id = self.resolve_category(slug, &mut result).await?;
        }
        if let Some(slugs) = &request.genre {
            draft.genre_ids = self.resolve_genres(slugs, &mut result).await?;
        }
        result.into_result()?;

        if let Some(name) = request.name {
            draft.name = name;
        }
        if let Some(year) = request.year {
            draft.year = year;
        }
        if let Some(description) = request.description {
            draft.description = Some(description);
        }

        self.title_repo.update(id, &draft).await
    }

    pub async fn delete(&self, identity: &Identity, id: &Uuid) -> AppResult<()> {
        ensure(identity, &Resource::Catalog, Action::Delete)?;
        self.title_repo.delete(id).await?;
        log_info!("Deleted title {}", id);
        Ok(())
    }

    async fn resolve_category(
        &self,
        slug: &str,
        result: &mut ValidationResult,
    ) -> AppResult<Option<Uuid>> {
        match self
            .taxonomy_repo
            .find_by_slug(TaxonomyKind::Category, slug)
            .await?
        {
            Some(category) => Ok(Some(category.id)),
            None => {
                result.add_error("category", missing_slug(slug));
                Ok(None)
            }
        }
    }

    async fn resolve_genres(
        &self,
        slugs: &[String],
        result: &mut ValidationResult,
    ) -> AppResult<Vec<Uuid>> {
        let wanted: BTreeSet<&String> = slugs.iter().collect();
        let requested: Vec<String> = wanted.iter().map(|s| (*s).clone()).collect();
        let found = self
            .taxonomy_repo
            .find_by_slugs(TaxonomyKind::Genre, &requested)
            .await?;

        for slug in &requested {
            if !found.iter().any(|genre| &genre.slug == slug) {
                result.add_error("genre", missing_slug(slug));
            }
        }
        Ok(found.into_iter().map(|genre| genre.id).collect())
    }
}

fn missing_slug(slug: &str) -> String {
    format!("Object with slug={} does not exist.", slug)
}
