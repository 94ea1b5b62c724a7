use diesel::prelude::*;
use diesel::sql_types;
use uuid::Uuid;

use crate::modules::catalog::domain::TaxonomyEntry;
use crate::schema::titles;

// ============= TAXONOMY MODELS =============

// Categories and genres share a shape; selected positionally from either table
#[derive(Queryable, Debug, Clone)]
pub struct TaxonomyRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<TaxonomyRow> for TaxonomyEntry {
    fn from(row: TaxonomyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

// ============= TITLE MODELS =============

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = titles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TitleModel {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = titles)]
pub struct NewTitleModel<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub year: i32,
    pub description: Option<&'a str>,
    pub category_id: Option<Uuid>,
}

// Full overwrite; None clears description and category
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = titles)]
#[diesel(treat_none_as_null = true)]
pub struct TitleChangeset<'a> {
    pub name: &'a str,
    pub year: i32,
    pub description: Option<&'a str>,
    pub category_id: Option<Uuid>,
}

// Aggregated review score per title
#[derive(QueryableByName, Debug, Clone)]
pub struct RatingRow {
    #[diesel(sql_type = sql_types::Uuid)]
    pub title_id: Uuid,
    #[diesel(sql_type = sql_types::Nullable<sql_types::Double>)]
    pub rating: Option<f64>,
}
