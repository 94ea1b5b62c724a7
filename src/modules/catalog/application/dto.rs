use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::domain::{TaxonomyEntry, Title, TitleFilter};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaxonomyRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyListQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyResponse {
    pub name: String,
    pub slug: String,
}

impl From<TaxonomyEntry> for TaxonomyResponse {
    fn from(entry: TaxonomyEntry) -> Self {
        Self {
            name: entry.name,
            slug: entry.slug,
        }
    }
}

/// Category and genres are referenced by slug.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTitleRequest {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTitleRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleListQuery {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TitleListQuery {
    /// Blank parameters are treated as absent.
    pub fn filter(&self) -> TitleFilter {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        TitleFilter {
            name: present(&self.name),
            year: self.year,
            category: present(&self.category),
            genre: present(&self.genre),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<TaxonomyResponse>,
    pub category: Option<TaxonomyResponse>,
    pub rating: Option<f64>,
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self {
            id: title.id,
            name: title.name,
            year: title.year,
            description: title.description,
            genre: title.genres.into_iter().map(TaxonomyResponse::from).collect(),
            category: title.category.map(TaxonomyResponse::from),
            rating: title.rating,
        }
    }
}
