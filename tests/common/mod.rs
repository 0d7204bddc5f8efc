use contacts_api::db::{DbPool, MIGRATIONS, establish_connection_pool};
use diesel_migrations::MigrationHarness;

/// File-backed SQLite database that applies the embedded migrations on
/// creation and removes its files when dropped.
pub struct TestDb {
    url: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        remove_db_files(name);

        let pool = establish_connection_pool(name).expect("Failed to build test pool");
        {
            let mut conn = pool.get().expect("Failed to get test connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Failed to run migrations");
        }

        Self {
            url: name.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[allow(dead_code)]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        remove_db_files(&self.url);
    }
}

fn remove_db_files(name: &str) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{name}{suffix}"));
    }
}
