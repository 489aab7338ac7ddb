// src/store/postgres.rs

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};

use super::{Document, DocumentStore, OrderBy};
use crate::error::StoreError;

/// Document collections kept as JSONB rows of the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

/// Raw row of the `documents` table.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    fields: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.fields.0)
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list collection {}: {:?}", collection, e);
            StoreError::from(e)
        })?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn list_collection_ordered(
        &self,
        collection: &str,
        order: &OrderBy,
    ) -> Result<Vec<Document>, StoreError> {
        // Time-like values (RFC 3339 with any offset, epoch numbers) sort chronologically;
        // everything else falls through to the raw JSONB comparison.
        // The sort key is bound; only the direction keyword is spliced in, and it comes from an enum.
        let direction = order.direction.as_sql();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, fields FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        builder.push(" ORDER BY document_sort_time(fields -> ");
        builder.push_bind(order.field.clone());
        builder.push(format!(") {} NULLS LAST, fields -> ", direction));
        builder.push_bind(order.field.clone());
        builder.push(format!(" {} NULLS LAST, id", direction));

        let rows: Vec<DocumentRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to list collection {} ordered by {}: {:?}",
                    collection,
                    order.field,
                    e
                );
                StoreError::from(e)
            })?;

        Ok(rows.into_iter().map(Document::from).collect())
    }
}
