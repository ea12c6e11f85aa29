//! # office-db
//!
//! PostgreSQL database layer for cdk-office.
//!
//! This crate provides:
//! - Connection pool management
//! - The document repository used by the AI processing workflow
//!
//! ## Example
//!
//! ```rust,ignore
//! use office_db::{Database, DocumentRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/office").await?;
//!     let doc = db.documents.fetch("doc-1").await?;
//!     println!("{} ({})", doc.title, doc.category);
//!     Ok(())
//! }
//! ```

pub mod documents;
pub mod pool;

// Re-export core types
pub use office_core::*;

pub use documents::PgDocumentRepository;
pub use pool::{create_default_pool, create_pool};

/// Database facade holding the pool and the repositories built on it.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Document repository.
    pub documents: PgDocumentRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            documents: PgDocumentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to `url` with the default pool size.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_default_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Connect using the database settings of `config`.
    pub async fn from_config(config: &OfficeConfig) -> Result<Self> {
        let pool = create_pool(&config.database_url, config.database_max_connections).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }
}
