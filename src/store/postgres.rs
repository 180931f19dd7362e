use super::{split_document_path, Document, DocumentStore, FieldMap};
use crate::config::DatabaseConfig;
use crate::db;
use crate::error::StoreError;
use serde_json::{Map, Value};
use sqlx::PgPool;

/// PostgreSQL JSONB 文档存储
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// 建立连接池并返回存储句柄，使用完毕后调用 [`DocumentStore::close`]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = db::create_pool(config).await?;
        Ok(Self { pool })
    }
}

impl DocumentStore for PgDocumentStore {
    async fn list_child_documents<'a>(
        &'a self,
        collection_path: &'a str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = db::list_documents(&self.pool, collection_path).await?;
        Ok(rows
            .into_iter()
            .map(|row| Document {
                fields: to_field_map(collection_path, &row.doc_id, row.fields.0),
                id: row.doc_id,
            })
            .collect())
    }

    async fn merge_fields<'a>(
        &'a self,
        document_path: &'a str,
        fields: &'a FieldMap,
    ) -> Result<(), StoreError> {
        let (collection, doc_id) = split_document_path(document_path)?;
        let json: Map<String, Value> = fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        db::merge_document_fields(&self.pool, collection, doc_id, &json).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// JSONB 字段 -> 字符串字段
///
/// 字符串原样保留，数字和布尔值转为字符串，null / 数组 / 对象丢弃。
fn to_field_map(collection: &str, doc_id: &str, raw: Map<String, Value>) -> FieldMap {
    let mut fields = FieldMap::with_capacity(raw.len());
    for (name, value) in raw {
        match value {
            Value::String(s) => {
                fields.insert(name, s);
            }
            Value::Number(n) => {
                fields.insert(name, n.to_string());
            }
            Value::Bool(b) => {
                fields.insert(name, b.to_string());
            }
            other => {
                tracing::warn!(
                    "Dropping non-scalar field {:?} in {}/{}: {}",
                    name,
                    collection,
                    doc_id,
                    other
                );
            }
        }
    }
    fields
}
