use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::modules::catalog::domain::{TaxonomyEntry, TaxonomyKind, TaxonomyRepository};
use crate::modules::catalog::infrastructure::models::TaxonomyRow;
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::query::{contains_pattern, unique_violation};
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

/// Runs `$body` with `$table` bound to the schema module for `$kind`.
macro_rules! with_taxonomy_table {
    ($kind:expr, $table:ident => $body:expr) => {
        match $kind {
            TaxonomyKind::Category => {
                use crate::schema::categories as $table;
                $body
            }
            TaxonomyKind::Genre => {
                use crate::schema::genres as $table;
                $body
            }
        }
    };
}

fn table_name(kind: TaxonomyKind) -> &'static str {
    match kind {
        TaxonomyKind::Category => "categories",
        TaxonomyKind::Genre => "genres",
    }
}

pub struct TaxonomyRepositoryImpl {
    db: Arc<Database>,
}

impl TaxonomyRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaxonomyRepository for TaxonomyRepositoryImpl {
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<String>,
        page: PageRequest,
    ) -> AppResult<Page<TaxonomyEntry>> {
        self.db
            .with_connection(move |conn| {
                let timer = TimedOperation::new("list", table_name(kind));
                let pattern = search.as_deref().map(contains_pattern);

                let (total, rows) = with_taxonomy_table!(kind, t => {
                    let mut count_query = t::table.into_boxed();
                    let mut load_query = t::table.into_boxed();
                    if let Some(pattern) = &pattern {
                        count_query = count_query.filter(t::name.ilike(pattern.clone()));
                        load_query = load_query.filter(t::name.ilike(pattern.clone()));
                    }

                    let total: i64 = count_query.count().get_result(conn)?;
                    let rows = load_query
                        .order((t::name.asc(), t::slug.asc()))
                        .limit(page.limit())
                        .offset(page.offset())
                        .select((t::id, t::name, t::slug))
                        .load::<TaxonomyRow>(conn)?;
                    (total, rows)
                });

                timer.finish();
                Ok(Page::new(
                    rows.into_iter().map(TaxonomyEntry::from).collect(),
                    total as u64,
                ))
            })
            .await
    }

    async fn find_by_slug(
        &self,
        kind: TaxonomyKind,
        slug: &str,
    ) -> AppResult<Option<TaxonomyEntry>> {
        let slug = slug.to_string();
        self.db
            .with_connection(move |conn| {
                let row = with_taxonomy_table!(kind, t => {
                    t::table
                        .filter(t::slug.eq(slug))
                        .select((t::id, t::name, t::slug))
                        .first::<TaxonomyRow>(conn)
                        .optional()?
                });
                Ok(row.map(TaxonomyEntry::from))
            })
            .await
    }

    async fn find_by_slugs(
        &self,
        kind: TaxonomyKind,
        slugs: &[String],
    ) -> AppResult<Vec<TaxonomyEntry>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }
        let slugs = slugs.to_vec();
        self.db
            .with_connection(move |conn| {
                let rows = with_taxonomy_table!(kind, t => {
                    t::table
                        .filter(t::slug.eq_any(slugs))
                        .order(t::name.asc())
                        .select((t::id, t::name, t::slug))
                        .load::<TaxonomyRow>(conn)?
                });
                Ok(rows.into_iter().map(TaxonomyEntry::from).collect())
            })
            .await
    }

    async fn insert(&self, kind: TaxonomyKind, entry: &TaxonomyEntry) -> AppResult<TaxonomyEntry> {
        let entry = entry.clone();
        self.db
            .with_connection(move |conn| {
                let inserted = with_taxonomy_table!(kind, t => {
                    diesel::insert_into(t::table)
                        .values((
                            t::id.eq(entry.id),
                            t::name.eq(&entry.name),
                            t::slug.eq(&entry.slug),
                        ))
                        .execute(conn)
                });

                match inserted {
                    Ok(_) => Ok(entry),
                    Err(err) if unique_violation(&err).is_some() => Err(AppError::field(
                        "slug",
                        format!("A {} with this slug already exists", kind),
                    )),
                    Err(err) => Err(err.into()),
                }
            })
            .await
    }

    async fn delete_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<()> {
        let slug = slug.to_string();
        self.db
            .with_connection(move |conn| {
                let deleted = with_taxonomy_table!(kind, t => {
                    diesel::delete(t::table.filter(t::slug.eq(&slug))).execute(conn)?
                });
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("No {} with slug '{}'", kind, slug)));
                }
                Ok(())
            })
            .await
    }
}
