/// Repository tests - database operations
///
/// Run only when TEST_DATABASE_URL points at a disposable Postgres database.
///
/// Tests cover:
/// - Unique constraint translation into validation errors
/// - Single-use confirmation codes
/// - Title hydration (category, genres, SQL-side rating)
/// - ON DELETE behaviour for categories, genres, titles and users
mod utils;

use chrono::{Duration, Utc};
use critiq_lib::modules::auth::domain::{code_hash, issued_after, ConfirmationCode};
use critiq_lib::modules::catalog::domain::{
    TaxonomyKind, TaxonomyRepository, TitleDraft, TitleFilter, TitleRepository,
};
use critiq_lib::modules::catalog::infrastructure::{TaxonomyRepositoryImpl, TitleRepositoryImpl};
use critiq_lib::modules::reviews::domain::{Comment, CommentRepository, ReviewRepository};
use critiq_lib::modules::reviews::infrastructure::{CommentRepositoryImpl, ReviewRepositoryImpl};
use critiq_lib::modules::users::domain::UserRepository;
use critiq_lib::modules::users::infrastructure::UserRepositoryImpl;
use critiq_lib::shared::application::PageRequest;
use critiq_lib::shared::errors::AppError;
use utils::db;
use utils::factories::{taxonomy, ReviewFactory, UserFactory};

fn draft(name: &str) -> TitleDraft {
    TitleDraft {
        name: name.to_string(),
        year: 1999,
        description: None,
        category_id: None,
        genre_ids: Vec::new(),
    }
}

#[tokio::test]
async fn duplicate_username_becomes_field_error() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let repo = UserRepositoryImpl::new(database.clone());
    repo.insert(&UserFactory::new().with_username("alice").build())
        .await
        .unwrap();

    let err = repo
        .insert(
            &UserFactory::new()
                .with_username("alice")
                .with_email("other@example.com")
                .build(),
        )
        .await
        .unwrap_err();
    match err {
        AppError::InvalidFields(result) => assert!(!result.errors_for("username").is_empty()),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn confirmation_is_consumed_once() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let repo = UserRepositoryImpl::new(database.clone());
    let user = repo.insert(&UserFactory::new().build()).await.unwrap();

    let code = ConfirmationCode::generate();
    let now = Utc::now();
    repo.store_confirmation(&user.id, code.seal(now)).await.unwrap();
    let cutoff = issued_after(now, Duration::hours(24));

    assert!(!repo
        .consume_confirmation(&user.id, &code_hash("wrong"), cutoff)
        .await
        .unwrap());
    assert!(repo
        .consume_confirmation(&user.id, &code_hash(code.as_str()), cutoff)
        .await
        .unwrap());
    assert!(!repo
        .consume_confirmation(&user.id, &code_hash(code.as_str()), cutoff)
        .await
        .unwrap());
}

#[tokio::test]
async fn expired_confirmation_is_not_consumed() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let repo = UserRepositoryImpl::new(database.clone());
    let user = repo.insert(&UserFactory::new().build()).await.unwrap();

    let code = ConfirmationCode::generate();
    let now = Utc::now();
    repo.store_confirmation(&user.id, code.seal(now - Duration::hours(25)))
        .await
        .unwrap();

    assert!(!repo
        .consume_confirmation(
            &user.id,
            &code_hash(code.as_str()),
            issued_after(now, Duration::hours(24)),
        )
        .await
        .unwrap());
}

#[tokio::test]
async fn second_review_by_same_author_is_validation_error() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let users = UserRepositoryImpl::new(database.clone());
    let titles = TitleRepositoryImpl::new(database.clone());
    let reviews = ReviewRepositoryImpl::new(database.clone());

    let author = users.insert(&UserFactory::new().build()).await.unwrap();
    let title = titles.insert(&draft("Heat")).await.unwrap();

    let saved = reviews
        .insert(&ReviewFactory::new(title.id, author.id).build())
        .await
        .unwrap();
    assert_eq!(saved.title_name, "Heat");
    assert_eq!(saved.author_username, author.username);
    assert!(reviews.exists_for_author(&title.id, &author.id).await.unwrap());

    let err = reviews
        .insert(&ReviewFactory::new(title.id, author.id).build())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn titles_are_hydrated_with_rating_and_taxonomy() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let users = UserRepositoryImpl::new(database.clone());
    let taxonomies = TaxonomyRepositoryImpl::new(database.clone());
    let titles = TitleRepositoryImpl::new(database.clone());
    let reviews = ReviewRepositoryImpl::new(database.clone());

    let film = taxonomies
        .insert(TaxonomyKind::Category, &taxonomy("Film", "film"))
        .await
        .unwrap();
    let thriller = taxonomies
        .insert(TaxonomyKind::Genre, &taxonomy("Thriller", "thriller"))
        .await
        .unwrap();
    let drama = taxonomies
        .insert(TaxonomyKind::Genre, &taxonomy("Drama", "drama"))
        .await
        .unwrap();

    let mut heat = draft("Heat");
    heat.category_id = Some(film.id);
    heat.genre_ids = vec![thriller.id, drama.id];
    let title = titles.insert(&heat).await.unwrap();
    assert_eq!(title.category.as_ref().map(|c| c.slug.as_str()), Some("film"));
    let genre_slugs: Vec<&str> = title.genres.iter().map(|g| g.slug.as_str()).collect();
    assert_eq!(genre_slugs, vec!["drama", "thriller"]);
    assert_eq!(title.rating, None);

    for score in [8, 10] {
        let author = users.insert(&UserFactory::new().build()).await.unwrap();
        reviews
            .insert(&ReviewFactory::new(title.id, author.id).with_score(score).build())
            .await
            .unwrap();
    }

    let reloaded = titles.find_by_id(&title.id).await.unwrap().unwrap();
    assert_eq!(reloaded.rating, Some(9.0));

    let filter = TitleFilter {
        genre: Some("drama".into()),
        ..Default::default()
    };
    let page = titles.list(filter, PageRequest::default()).await.unwrap();
    assert_eq!(page.total_count, 1);

    let filter = TitleFilter {
        category: Some("series".into()),
        ..Default::default()
    };
    let page = titles.list(filter, PageRequest::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn deleting_category_nulls_title_reference() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let taxonomies = TaxonomyRepositoryImpl::new(database.clone());
    let titles = TitleRepositoryImpl::new(database.clone());

    let film = taxonomies
        .insert(TaxonomyKind::Category, &taxonomy("Film", "film"))
        .await
        .unwrap();
    let mut heat = draft("Heat");
    heat.category_id = Some(film.id);
    let title = titles.insert(&heat).await.unwrap();

    taxonomies
        .delete_by_slug(TaxonomyKind::Category, "film")
        .await
        .unwrap();

    let reloaded = titles.find_by_id(&title.id).await.unwrap().unwrap();
    assert!(reloaded.category.is_none());

    taxonomies
        .insert(TaxonomyKind::Genre, &taxonomy("Drama", "drama"))
        .await
        .unwrap();
    let err = taxonomies
        .insert(TaxonomyKind::Genre, &taxonomy("Drama again", "drama"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidFields(_)));
}

#[tokio::test]
async fn deleting_user_cascades_to_reviews_and_comments() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let users = UserRepositoryImpl::new(database.clone());
    let titles = TitleRepositoryImpl::new(database.clone());
    let reviews = ReviewRepositoryImpl::new(database.clone());
    let comments = CommentRepositoryImpl::new(database.clone());

    let alice = users.insert(&UserFactory::new().build()).await.unwrap();
    let bob = users.insert(&UserFactory::new().build()).await.unwrap();
    let title = titles.insert(&draft("Heat")).await.unwrap();
    let review = reviews
        .insert(&ReviewFactory::new(title.id, alice.id).build())
        .await
        .unwrap();
    let comment = comments
        .insert(&Comment::new(review.review.id, bob.id, "Nice".into()))
        .await
        .unwrap();
    assert_eq!(comment.author_username, bob.username);

    users.delete(&alice.id).await.unwrap();

    assert!(reviews
        .find(&title.id, &review.review.id)
        .await
        .unwrap()
        .is_none());
    let page = comments
        .list_for_review(&review.review.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert!(users.find_by_id(&bob.id).await.unwrap().is_some());

    titles.delete(&title.id).await.unwrap();
    assert!(matches!(
        titles.delete(&title.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn deleting_title_cascades_to_reviews_comments_and_links() {
    let Some(database) = db::test_database() else {
        return;
    };
    let _guard = db::acquire_test_lock();
    db::clean_test_db(&database);

    let users = UserRepositoryImpl::new(database.clone());
    let taxonomies = TaxonomyRepositoryImpl::new(database.clone());
    let titles = TitleRepositoryImpl::new(database.clone());
    let reviews = ReviewRepositoryImpl::new(database.clone());
    let comments = CommentRepositoryImpl::new(database.clone());

    let drama = taxonomies
        .insert(TaxonomyKind::Genre, &taxonomy("Drama", "drama"))
        .await
        .unwrap();
    let mut heat = draft("Heat");
    heat.genre_ids = vec![drama.id];
    let doomed = titles.insert(&heat).await.unwrap();
    let kept = titles.insert(&draft("Ronin")).await.unwrap();

    let alice = users.insert(&UserFactory::new().build()).await.unwrap();
    let bob = users.insert(&UserFactory::new().build()).await.unwrap();
    let review = reviews
        .insert(&ReviewFactory::new(doomed.id, alice.id).build())
        .await
        .unwrap();
    comments
        .insert(&Comment::new(review.review.id, bob.id, "Agreed".into()))
        .await
        .unwrap();
    reviews
        .insert(&ReviewFactory::new(kept.id, alice.id).build())
        .await
        .unwrap();

    assert_eq!(db::count_rows(&database, "genre_title", "title_id", doomed.id), 1);
    assert_eq!(db::count_rows(&database, "comments", "review_id", review.review.id), 1);

    titles.delete(&doomed.id).await.unwrap();

    assert_eq!(db::count_rows(&database, "reviews", "title_id", doomed.id), 0);
    assert_eq!(db::count_rows(&database, "comments", "review_id", review.review.id), 0);
    assert_eq!(db::count_rows(&database, "genre_title", "title_id", doomed.id), 0);
    // Unrelated rows survive
    assert_eq!(db::count_rows(&database, "reviews", "title_id", kept.id), 1);
    assert_eq!(db::count_rows(&database, "genres", "id", drama.id), 1);
    assert!(users.find_by_id(&alice.id).await.unwrap().is_some());
}
