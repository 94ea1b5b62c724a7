use std::fmt;

use uuid::Uuid;

/// The two flat classification schemes titles are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Category,
    Genre,
}

impl TaxonomyKind {
    pub fn label(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category",
            TaxonomyKind::Genre => "genre",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category or genre. Addressed externally by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl TaxonomyEntry {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }
}
