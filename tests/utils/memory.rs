/// In-memory repositories sharing one store
///
/// Mirrors the storage rules the migrations enforce (unique keys, cascades,
/// SET NULL on category delete) so the full router can run without Postgres.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use critiq_lib::api::Repositories;
use critiq_lib::modules::catalog::domain::{
    TaxonomyEntry, TaxonomyKind, TaxonomyRepository, Title, TitleDraft, TitleFilter,
    TitleRepository,
};
use critiq_lib::modules::reviews::domain::{
    Comment, CommentDetails, CommentRepository, Review, ReviewDetails, ReviewRepository,
};
use critiq_lib::modules::users::domain::{StoredConfirmation, User, UserRepository};
use critiq_lib::shared::application::{Page, PageRequest};
use critiq_lib::shared::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

// Same result as the AVG the title queries compute
fn mean_rating(scores: &[i16]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().map(|&s| f64::from(s)).sum();
    Some(sum / scores.len() as f64)
}

#[derive(Debug, Clone)]
pub struct TitleRow {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub confirmations: HashMap<Uuid, StoredConfirmation>,
    pub categories: Vec<TaxonomyEntry>,
    pub genres: Vec<TaxonomyEntry>,
    pub titles: Vec<TitleRow>,
    pub reviews: Vec<Review>,
    pub comments: Vec<Comment>,
}

impl Store {
    fn taxonomy(&self, kind: TaxonomyKind) -> &Vec<TaxonomyEntry> {
        match kind {
            TaxonomyKind::Category => &self.categories,
            TaxonomyKind::Genre => &self.genres,
        }
    }

    fn taxonomy_mut(&mut self, kind: TaxonomyKind) -> &mut Vec<TaxonomyEntry> {
        match kind {
            TaxonomyKind::Category => &mut self.categories,
            TaxonomyKind::Genre => &mut self.genres,
        }
    }

    fn hydrate(&self, row: &TitleRow) -> Title {
        let mut genres: Vec<TaxonomyEntry> = self
            .genres
            .iter()
            .filter(|g| row.genre_ids.contains(&g.id))
            .cloned()
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));

        let scores: Vec<i16> = self
            .reviews
            .iter()
            .filter(|r| r.title_id == row.id)
            .map(|r| r.score)
            .collect();

        Title {
            id: row.id,
            name: row.name.clone(),
            year: row.year,
            description: row.description.clone(),
            category: row
                .category_id
                .and_then(|id| self.categories.iter().find(|c| c.id == id).cloned()),
            genres,
            rating: mean_rating(&scores),
        }
    }

    fn review_details(&self, review: &Review) -> AppResult<ReviewDetails> {
        let title = self
            .titles
            .iter()
            .find(|t| t.id == review.title_id)
            .ok_or_else(|| AppError::DatabaseError("dangling title".into()))?;
        let author = self
            .users
            .iter()
            .find(|u| u.id == review.author_id)
            .ok_or_else(|| AppError::DatabaseError("dangling author".into()))?;
        Ok(ReviewDetails {
            review: review.clone(),
            title_name: title.name.clone(),
            author_username: author.username.clone(),
        })
    }

    fn comment_details(&self, comment: &Comment) -> AppResult<CommentDetails> {
        let review = self
            .reviews
            .iter()
            .find(|r| r.id == comment.review_id)
            .ok_or_else(|| AppError::DatabaseError("dangling review".into()))?;
        let author = self
            .users
            .iter()
            .find(|u| u.id == comment.author_id)
            .ok_or_else(|| AppError::DatabaseError("dangling author".into()))?;
        Ok(CommentDetails {
            comment: comment.clone(),
            review_text: review.text.clone(),
            author_username: author.username.clone(),
        })
    }

    fn remove_reviews(&mut self, doomed: impl Fn(&Review) -> bool) {
        let removed: Vec<Uuid> = self
            .reviews
            .iter()
            .filter(|r| doomed(r))
            .map(|r| r.id)
            .collect();
        self.reviews.retain(|r| !removed.contains(&r.id));
        self.comments.retain(|c| !removed.contains(&c.review_id));
    }

    fn check_user_unique(&self, user: &User) -> AppResult<()> {
        let others = self.users.iter().filter(|u| u.id != user.id);
        for other in others {
            if other.username == user.username {
                return Err(AppError::field(
                    "username",
                    "A user with that username already exists",
                ));
            }
            if other.email == user.email {
                return Err(AppError::field("email", "A user with that email already exists"));
            }
        }
        Ok(())
    }
}

/// Cloneable handle on the shared store.
#[derive(Clone, Default)]
pub struct MemoryStore(Arc<Mutex<Store>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Store> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(MemoryUsers(self.clone())),
            taxonomies: Arc::new(MemoryTaxonomies(self.clone())),
            titles: Arc::new(MemoryTitles(self.clone())),
            reviews: Arc::new(MemoryReviews(self.clone())),
            comments: Arc::new(MemoryComments(self.clone())),
        }
    }
}

pub struct MemoryUsers(pub MemoryStore);
pub struct MemoryTaxonomies(pub MemoryStore);
pub struct MemoryTitles(pub MemoryStore);
pub struct MemoryReviews(pub MemoryStore);
pub struct MemoryComments(pub MemoryStore);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, search: Option<String>, page: PageRequest) -> AppResult<Page<User>> {
        let needle = search.map(|s| s.to_lowercase());
        let mut users: Vec<User> = self
            .0
            .lock()
            .users
            .iter()
            .filter(|u| match &needle {
                Some(needle) => u.username.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(Page::from_vec(users, &page))
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut store = self.0.lock();
        store.check_user_unique(user)?;
        store.users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut store = self.0.lock();
        store.check_user_unique(user)?;
        let slot = store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound("user".into()))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let mut store = self.0.lock();
        let before = store.users.len();
        store.users.retain(|u| u.id != *id);
        if store.users.len() == before {
            return Err(AppError::NotFound("user".into()));
        }
        store.confirmations.remove(id);
        store.remove_reviews(|r| r.author_id == *id);
        store.comments.retain(|c| c.author_id != *id);
        Ok(())
    }

    async fn store_confirmation(
        &self,
        id: &Uuid,
        confirmation: StoredConfirmation,
    ) -> AppResult<()> {
        self.0.lock().confirmations.insert(*id, confirmation);
        Ok(())
    }

    async fn consume_confirmation(
        &self,
        id: &Uuid,
        code_hash: &str,
        issued_after: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut store = self.0.lock();
        let matches = store
            .confirmations
            .get(id)
            .is_some_and(|c| c.code_hash == code_hash && c.issued_at >= issued_after);
        if matches {
            store.confirmations.remove(id);
        }
        Ok(matches)
    }
}

#[async_trait]
impl TaxonomyRepository for MemoryTaxonomies {
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<String>,
        page: PageRequest,
    ) -> AppResult<Page<TaxonomyEntry>> {
        let needle = search.map(|s| s.to_lowercase());
        let mut entries: Vec<TaxonomyEntry> = self
            .0
            .lock()
            .taxonomy(kind)
            .iter()
            .filter(|e| match &needle {
                Some(needle) => e.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        Ok(Page::from_vec(entries, &page))
    }

    async fn find_by_slug(
        &self,
        kind: TaxonomyKind,
        slug: &str,
    ) -> AppResult<Option<TaxonomyEntry>> {
        Ok(self
            .0
            .lock()
            .taxonomy(kind)
            .iter()
            .find(|e| e.slug == slug)
            .cloned())
    }

    async fn find_by_slugs(
        &self,
        kind: TaxonomyKind,
        slugs: &[String],
    ) -> AppResult<Vec<TaxonomyEntry>> {
        Ok(self
            .0
            .lock()
            .taxonomy(kind)
            .iter()
            .filter(|e| slugs.contains(&e.slug))
            .cloned()
            .collect())
    }

    async fn insert(&self, kind: TaxonomyKind, entry: &TaxonomyEntry) -> AppResult<TaxonomyEntry> {
        let mut store = self.0.lock();
        if store.taxonomy(kind).iter().any(|e| e.slug == entry.slug) {
            return Err(AppError::field(
                "slug",
                format!("A {} with this slug already exists", kind),
            ));
        }
        store.taxonomy_mut(kind).push(entry.clone());
        Ok(entry.clone())
    }

    async fn delete_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<()> {
        let mut store = self.0.lock();
        let Some(entry) = store.taxonomy(kind).iter().find(|e| e.slug == slug).cloned() else {
            return Err(AppError::NotFound(format!("No {} '{}'", kind, slug)));
        };
        store.taxonomy_mut(kind).retain(|e| e.id != entry.id);
        for title in store.titles.iter_mut() {
            match kind {
                TaxonomyKind::Category => {
                    if title.category_id == Some(entry.id) {
                        title.category_id = None;
                    }
                }
                TaxonomyKind::Genre => title.genre_ids.retain(|id| *id != entry.id),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TitleRepository for MemoryTitles {
    async fn list(&self, filter: TitleFilter, page: PageRequest) -> AppResult<Page<Title>> {
        let store = self.0.lock();
        let category_id = filter
            .category
            .as_ref()
            .map(|slug| store.categories.iter().find(|c| &c.slug == slug).map(|c| c.id));
        let genre_id = filter
            .genre
            .as_ref()
            .map(|slug| store.genres.iter().find(|g| &g.slug == slug).map(|g| g.id));
        let name = filter.name.as_ref().map(|n| n.to_lowercase());

        let mut rows: Vec<&TitleRow> = store
            .titles
            .iter()
            .filter(|t| name.as_ref().map_or(true, |n| t.name.to_lowercase().contains(n)))
            .filter(|t| filter.year.map_or(true, |y| t.year == y))
            .filter(|t| match category_id {
                Some(Some(id)) => t.category_id == Some(id),
                Some(None) => false,
                None => true,
            })
            .filter(|t| match genre_id {
                Some(Some(id)) => t.genre_ids.contains(&id),
                Some(None) => false,
                None => true,
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let titles: Vec<Title> = rows.into_iter().map(|row| store.hydrate(row)).collect();
        Ok(Page::from_vec(titles, &page))
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Title>> {
        let store = self.0.lock();
        Ok(store
            .titles
            .iter()
            .find(|t| t.id == *id)
            .map(|row| store.hydrate(row)))
    }

    async fn exists(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.0.lock().titles.iter().any(|t| t.id == *id))
    }

    async fn insert(&self, draft: &TitleDraft) -> AppResult<Title> {
        let mut store = self.0.lock();
        let row = TitleRow {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            year: draft.year,
            description: draft.description.clone(),
            category_id: draft.category_id,
            genre_ids: draft.genre_ids.clone(),
        };
        store.titles.push(row.clone());
        Ok(store.hydrate(&row))
    }

    async fn update(&self, id: &Uuid, draft: &TitleDraft) -> AppResult<Title> {
        let mut store = self.0.lock();
        let row = store
            .titles
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| AppError::NotFound("title".into()))?;
        row.name = draft.name.clone();
        row.year = draft.year;
        row.description = draft.description.clone();
        row.category_id = draft.category_id;
        row.genre_ids = draft.genre_ids.clone();
        let row = row.clone();
        Ok(store.hydrate(&row))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let mut store = self.0.lock();
        let before = store.titles.len();
        store.titles.retain(|t| t.id != *id);
        if store.titles.len() == before {
            return Err(AppError::NotFound("title".into()));
        }
        store.remove_reviews(|r| r.title_id == *id);
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviews {
    async fn list_for_title(
        &self,
        title_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<ReviewDetails>> {
        let store = self.0.lock();
        let mut reviews: Vec<&Review> = store
            .reviews
            .iter()
            .filter(|r| r.title_id == *title_id)
            .collect();
        reviews.sort_by(|a, b| a.pub_date.cmp(&b.pub_date).then_with(|| a.id.cmp(&b.id)));
        let details = reviews
            .into_iter()
            .map(|r| store.review_details(r))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::from_vec(details, &page))
    }

    async fn find(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<Option<ReviewDetails>> {
        let store = self.0.lock();
        store
            .reviews
            .iter()
            .find(|r| r.id == *review_id && r.title_id == *title_id)
            .map(|r| store.review_details(r))
            .transpose()
    }

    async fn exists_for_author(&self, title_id: &Uuid, author_id: &Uuid) -> AppResult<bool> {
        Ok(self
            .0
            .lock()
            .reviews
            .iter()
            .any(|r| r.title_id == *title_id && r.author_id == *author_id))
    }

    async fn insert(&self, review: &Review) -> AppResult<ReviewDetails> {
        let mut store = self.0.lock();
        if store
            .reviews
            .iter()
            .any(|r| r.title_id == review.title_id && r.author_id == review.author_id)
        {
            return Err(AppError::ValidationError(
                "You have already reviewed this title".into(),
            ));
        }
        store.reviews.push(review.clone());
        store.review_details(review)
    }

    async fn update(&self, review: &Review) -> AppResult<ReviewDetails> {
        let mut store = self.0.lock();
        let slot = store
            .reviews
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or_else(|| AppError::NotFound("review".into()))?;
        slot.text = review.text.clone();
        slot.score = review.score;
        let updated = slot.clone();
        store.review_details(&updated)
    }

    async fn delete(&self, review_id: &Uuid) -> AppResult<()> {
        let mut store = self.0.lock();
        if !store.reviews.iter().any(|r| r.id == *review_id) {
            return Err(AppError::NotFound("review".into()));
        }
        store.remove_reviews(|r| r.id == *review_id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryComments {
    async fn list_for_review(
        &self,
        review_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<CommentDetails>> {
        let store = self.0.lock();
        let mut comments: Vec<&Comment> = store
            .comments
            .iter()
            .filter(|c| c.review_id == *review_id)
            .collect();
        comments.sort_by(|a, b| a.pub_date.cmp(&b.pub_date).then_with(|| a.id.cmp(&b.id)));
        let details = comments
            .into_iter()
            .map(|c| store.comment_details(c))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::from_vec(details, &page))
    }

    async fn find(
        &self,
        review_id: &Uuid,
        comment_id: &Uuid,
    ) -> AppResult<Option<CommentDetails>> {
        let store = self.0.lock();
        store
            .comments
            .iter()
            .find(|c| c.id == *comment_id && c.review_id == *review_id)
            .map(|c| store.comment_details(c))
            .transpose()
    }

    async fn insert(&self, comment: &Comment) -> AppResult<CommentDetails> {
        let mut store = self.0.lock();
        store.comments.push(comment.clone());
        store.comment_details(comment)
    }

    async fn update(&self, comment: &Comment) -> AppResult<CommentDetails> {
        let mut store = self.0.lock();
        let slot = store
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or_else(|| AppError::NotFound("comment".into()))?;
        slot.text = comment.text.clone();
        let updated = slot.clone();
        store.comment_details(&updated)
    }

    async fn delete(&self, comment_id: &Uuid) -> AppResult<()> {
        let mut store = self.0.lock();
        let before = store.comments.len();
        store.comments.retain(|c| c.id != *comment_id);
        if store.comments.len() == before {
            return Err(AppError::NotFound("comment".into()));
        }
        Ok(())
    }
}
