/// Database test utilities with singleton pattern
///
/// Postgres-backed tests only run when TEST_DATABASE_URL is set; otherwise
/// `test_database` returns None and the test exits early.
use critiq_lib::shared::config::DatabaseSettings;
use critiq_lib::shared::Database;
use diesel::prelude::*;
use std::sync::{Arc, Mutex, OnceLock};

static DATABASE: OnceLock<Option<Arc<Database>>> = OnceLock::new();

/// Get or create the shared, migrated test database
pub fn test_database() -> Option<Arc<Database>> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let url = std::env::var("TEST_DATABASE_URL").ok()?;
            let database = Database::connect(&DatabaseSettings {
                url,
                max_connections: Some(4),
            })
            .expect("Failed to create test database pool");
            database
                .run_migrations()
                .expect("Failed to run migrations on test database");
            Some(Arc::new(database))
        })
        .clone()
}

/// Clean all test tables - use at the start of each test
pub fn clean_test_db(database: &Database) {
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query(
        "TRUNCATE TABLE comments, reviews, genre_title, titles, genres, categories, users \
         RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .expect("Failed to clean test tables");
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

/// Count rows of `table` whose `column` equals `id`
pub fn count_rows(database: &Database, table: &str, column: &str, id: uuid::Uuid) -> i64 {
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {} = $1",
        table, column
    ))
    .bind::<diesel::sql_types::Uuid, _>(id)
    .get_result::<RowCount>(&mut conn)
    .expect("Failed to count rows")
    .count
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
