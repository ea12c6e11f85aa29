//! Document repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use office_core::logging::SUBSYSTEM_DB;
use office_core::{Document, DocumentRepository, Error, Result};

const SELECT_COLUMNS: &str = "id, title, description, file_path, file_size, mime_type, \
     owner_id, team_id, status, category, tags::text AS tags, created_at, updated_at";

/// PostgreSQL implementation of DocumentRepository.
#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: Pool<Postgres>,
}

impl PgDocumentRepository {
    /// Create a new PgDocumentRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new document row. Used by the upload path.
    pub async fn insert(&self, document: &Document) -> Result<()> {
        sqlx::query(
            "INSERT INTO document (id, title, description, file_path, file_size, mime_type,
                                   owner_id, team_id, status, category, tags, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11::jsonb, $12, $13)",
        )
        .bind(&document.id)
        .bind(&document.title)
        .bind(&document.description)
        .bind(&document.file_path)
        .bind(document.file_size)
        .bind(&document.mime_type)
        .bind(&document.owner_id)
        .bind(&document.team_id)
        .bind(&document.status)
        .bind(&document.category)
        .bind(stored_tags(document))
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    /// Check if a document exists.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM document WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

/// Never-annotated documents may carry an empty tags string; the column is JSONB.
fn stored_tags(document: &Document) -> &str {
    if document.tags.trim().is_empty() {
        "[]"
    } else {
        &document.tags
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn fetch(&self, id: &str) -> Result<Document> {
        let sql = format!("SELECT {} FROM document WHERE id = $1", SELECT_COLUMNS);
        sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    async fn save(&self, document: &Document) -> Result<()> {
        // Full-row snapshot in one statement: concurrent saves resolve last-write-wins.
        let result = sqlx::query(
            "UPDATE document
             SET title = $2, description = $3, file_path = $4, file_size = $5,
                 mime_type = $6, owner_id = $7, team_id = $8, status = $9,
                 category = $10, tags = $11::jsonb, updated_at = $12
             WHERE id = $1",
        )
        .bind(&document.id)
        .bind(&document.title)
        .bind(&document.description)
        .bind(&document.file_path)
        .bind(document.file_size)
        .bind(&document.mime_type)
        .bind(&document.owner_id)
        .bind(&document.team_id)
        .bind(&document.status)
        .bind(&document.category)
        .bind(stored_tags(document))
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(document.id.clone()));
        }

        debug!(
            subsystem = SUBSYSTEM_DB,
            component = "documents",
            op = "save",
            document_id = %document.id,
            "Document saved"
        );
        Ok(())
    }
}
