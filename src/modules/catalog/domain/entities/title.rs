use uuid::Uuid;

use super::taxonomy::TaxonomyEntry;

/// A reviewable work together with its classification and derived rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<TaxonomyEntry>,
    pub genres: Vec<TaxonomyEntry>,
    /// Mean review score; `None` until the first review arrives.
    pub rating: Option<f64>,
}

impl Title {
    /// Current state as a write payload, ready to be patched.
    pub fn to_draft(&self) -> TitleDraft {
        TitleDraft {
            name: self.name.clone(),
            year: self.year,
            description: self.description.clone(),
            category_id: self.category.as_ref().map(|c| c.id),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

/// Everything the store needs to write a title row and its genre links.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDraft {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

/// List filters. Name matches as a case-insensitive substring, the rest
/// exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleFilter {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub genre: Option<String>,
}
