use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::catalog::domain::{
    TaxonomyEntry, Title, TitleDraft, TitleFilter, TitleRepository,
};
use crate::modules::catalog::infrastructure::models::{
    NewTitleModel, RatingRow, TaxonomyRow, TitleChangeset, TitleModel,
};
use crate::schema::{categories, genre_title, genres, titles};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::query::contains_pattern;
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

pub struct TitleRepositoryImpl {
    db: Arc<Database>,
}

impl TitleRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn filtered(filter: &TitleFilter) -> titles::BoxedQuery<'static, Pg> {
    let mut query = titles::table.into_boxed();

    if let Some(name) = &filter.name {
        query = query.filter(titles::name.ilike(contains_pattern(name)));
    }
    if let Some(year) = filter.year {
        query = query.filter(titles::year.eq(year));
    }
    if let Some(slug) = &filter.category {
        query = query.filter(
            titles::category_id.eq_any(
                categories::table
                    .filter(categories::slug.eq(slug.clone()))
                    .select(categories::id.nullable()),
            ),
        );
    }
    if let Some(slug) = &filter.genre {
        query = query.filter(
            titles::id.eq_any(
                genre_title::table
                    .inner_join(genres::table)
                    .filter(genres::slug.eq(slug.clone()))
                    .select(genre_title::title_id),
            ),
        );
    }

    query
}

/// Attach category, genres and rating to a batch of title rows, keeping order.
fn hydrate(conn: &mut PgConnection, models: Vec<TitleModel>) -> AppResult<Vec<Title>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let title_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let category_ids: Vec<Uuid> = models.iter().filter_map(|m| m.category_id).collect();

    let categories_by_id: HashMap<Uuid, TaxonomyEntry> = categories::table
        .filter(categories::id.eq_any(&category_ids))
        .select((categories::id, categories::name, categories::slug))
        .load::<TaxonomyRow>(conn)?
        .into_iter()
        .map(|row| (row.id, TaxonomyEntry::from(row)))
        .collect();

    let mut genres_by_title: HashMap<Uuid, Vec<TaxonomyEntry>> = HashMap::new();
    let links = genre_title::table
        .inner_join(genres::table)
        .filter(genre_title::title_id.eq_any(&title_ids))
        .order(genres::name.asc())
        .select((genre_title::title_id, (genres::id, genres::name, genres::slug)))
        .load::<(Uuid, TaxonomyRow)>(conn)?;
    for (title_id, row) in links {
        genres_by_title
            .entry(title_id)
            .or_default()
            .push(TaxonomyEntry::from(row));
    }

    let ratings: HashMap<Uuid, Option<f64>> = diesel::sql_query(
        "SELECT title_id, AVG(score)::float8 AS rating \
         FROM reviews WHERE title_id = ANY($1) GROUP BY title_id",
    )
    .bind::<sql_types::Array<sql_types::Uuid>, _>(title_ids.clone())
    .load::<RatingRow>(conn)?
    .into_iter()
    .map(|row| (row.title_id, row.rating))
    .collect();

    Ok(models
        .into_iter()
        .map(|model| Title {
            category: model
                .category_id
                .and_then(|id| categories_by_id.get(&id).cloned()),
            genres: genres_by_title.remove(&model.id).unwrap_or_default(),
            rating: ratings.get(&model.id).copied().flatten(),
            id: model.id,
            name: model.name,
            year: model.year,
            description: model.description,
        })
        .collect())
}

fn load_one(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Title>> {
    let model = titles::table
        .find(id)
        .select(TitleModel::as_select())
        .first::<TitleModel>(conn)
        .optional()?;

    match model {
        Some(model) => Ok(hydrate(conn, vec![model])?.pop()),
        None => Ok(None),
    }
}

fn replace_genres(conn: &mut PgConnection, title_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
    diesel::delete(genre_title::table.filter(genre_title::title_id.eq(title_id))).execute(conn)?;

    if !genre_ids.is_empty() {
        let links: Vec<_> = genre_ids
            .iter()
            .map(|genre_id| {
                (
                    genre_title::title_id.eq(title_id),
                    genre_title::genre_id.eq(*genre_id),
                )
            })
            .collect();
        diesel::insert_into(genre_title::table)
            .values(links)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }
    Ok(())
}

#[async_trait]
impl TitleRepository for TitleRepositoryImpl {
    async fn list(&self, filter: TitleFilter, page: PageRequest) -> AppResult<Page<Title>> {
        self.db
            .with_connection(move |conn| {
                let timer = TimedOperation::new("list", "titles");

                let total: i64 = filtered(&filter).count().get_result(conn)?;
                let models = filtered(&filter)
                    .order((titles::name.asc(), titles::id.asc()))
                    .limit(page.limit())
                    .offset(page.offset())
                    .select(TitleModel::as_select())
                    .load::<TitleModel>(conn)?;
                let items = hydrate(conn, models)?;

                timer.finish();
                Ok(Page::new(items, total as u64))
            })
            .await
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Title>> {
        let id = *id;
        self.db.with_connection(move |conn| load_one(conn, id)).await
    }

    async fn exists(&self, id: &Uuid) -> AppResult<bool> {
        let id = *id;
        self.db
            .with_connection(move |conn| {
                let found = diesel::select(diesel::dsl::exists(titles::table.find(id)))
                    .get_result::<bool>(conn)?;
                Ok(found)
            })
            .await
    }

    async fn insert(&self, draft: &TitleDraft) -> AppResult<Title> {
        let draft = draft.clone();
        self.db
            .with_connection(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let id = Uuid::new_v4();
                    diesel::insert_into(titles::table)
                        .values(NewTitleModel {
                            id,
                            name: &draft.name,
                            year: draft.year,
                            description: draft.description.as_deref(),
                            category_id: draft.category_id,
                        })
                        .execute(conn)?;
                    replace_genres(conn, id, &draft.genre_ids)?;

                    load_one(conn, id)?.ok_or_else(|| {
                        AppError::InternalError("Inserted title vanished".to_string())
                    })
                })
            })
            .await
    }

    async fn update(&self, id: &Uuid, draft: &TitleDraft) -> AppResult<Title> {
        let id = *id;
        let draft = draft.clone();
        self.db
            .with_connection(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let updated = diesel::update(titles::table.find(id))
                        .set(TitleChangeset {
                            name: &draft.name,
                            year: draft.year,
                            description: draft.description.as_deref(),
                            category_id: draft.category_id,
                        })
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(AppError::NotFound(format!("Title {} not found", id)));
                    }
                    replace_genres(conn, id, &draft.genre_ids)?;

                    load_one(conn, id)?
                        .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))
                })
            })
            .await
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let id = *id;
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(titles::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Title {} not found", id)));
                }
                Ok(())
            })
            .await
    }
}
