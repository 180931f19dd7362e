use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

/// documents 表中的一行
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub doc_id: String,
    pub fields: Json<Map<String, Value>>,
}

/// 查询集合下所有文档 (按文档 ID 升序)
pub async fn list_documents(
    pool: &PgPool,
    collection: &str,
) -> Result<Vec<DocumentRow>, sqlx::Error> {
    sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT doc_id, fields
        FROM documents
        WHERE collection = $1
        ORDER BY doc_id
        "#,
    )
    .bind(collection)
    .fetch_all(pool)
    .await
}

/// 字段级合并写入
///
/// 单条语句完成 upsert，`||` 只覆盖本次出现的字段，
/// 并发写同一文档不同字段时互不丢失。
pub async fn merge_document_fields(
    pool: &PgPool,
    collection: &str,
    doc_id: &str,
    fields: &Map<String, Value>,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO documents (collection, doc_id, fields, updated_at)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (collection, doc_id)
        DO UPDATE SET fields = documents.fields || EXCLUDED.fields,
                      updated_at = now()
        "#,
    )
    .bind(collection)
    .bind(doc_id)
    .bind(Json(fields))
    .execute(pool)
    .await?;

    tracing::debug!(
        "merged {} field(s) into {}/{}, affected {} row(s)",
        fields.len(),
        collection,
        doc_id,
        result.rows_affected()
    );
    Ok(())
}
