use super::{split_document_path, Document, DocumentStore, FieldMap};
use crate::error::StoreError;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// 内存文档存储 (本地调试 / 测试)
///
/// 每个集合对应一个 DashMap 条目，合并写入期间持有该条目的写锁，
/// 因此同一集合内的字段合并是原子的。
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, BTreeMap<String, FieldMap>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn list_child_documents<'a>(
        &'a self,
        collection_path: &'a str,
    ) -> Result<Vec<Document>, StoreError> {
        let documents: Vec<Document> = self
            .collections
            .get(collection_path)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn merge_fields<'a>(
        &'a self,
        document_path: &'a str,
        fields: &'a FieldMap,
    ) -> Result<(), StoreError> {
        let (collection, doc_id) = split_document_path(document_path)?;

        let mut docs = self.collections.entry(collection.to_string()).or_default();
        let document = docs.entry(doc_id.to_string()).or_default();
        for (name, value) in fields {
            document.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!("Memory document store closed ({} collections)", self.collections.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn missing_collection_lists_empty() {
        let store = MemoryDocumentStore::new();
        assert!(store.list_child_documents("branches").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn merge_keeps_untouched_fields() {
        let store = MemoryDocumentStore::new();
        store
            .merge_fields("orders/01.01.2024/branches/a", &fields(&[("sugar", "5"), ("salt", "1")]))
            .await
            .unwrap();
        store
            .merge_fields("orders/01.01.2024/branches/a", &fields(&[("sugar", "7")]))
            .await
            .unwrap();

        let docs = store
            .list_child_documents("orders/01.01.2024/branches")
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[0].fields, fields(&[("sugar", "7"), ("salt", "1")]));
    }

    #[tokio::test]
    async fn lists_documents_ordered_by_id() {
        let store = MemoryDocumentStore::new();
        for id in ["c", "a", "b"] {
            store
                .merge_fields(&format!("branches/{}", id), &fields(&[("name", id)]))
                .await
                .unwrap();
        }

        let ids: Vec<String> = store
            .list_child_documents("branches")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn rejects_collection_path_on_write() {
        let store = MemoryDocumentStore::new();
        let err = store
            .merge_fields("orders/01.01.2024/branches", &fields(&[("sugar", "1")]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn concurrent_writers_on_different_products_both_land() {
        let store = Arc::new(MemoryDocumentStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let product = format!("product-{}", i);
                store
                    .merge_fields("orders/01.01.2024/branches/a", &fields(&[(product.as_str(), "1")]))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let docs = store
            .list_child_documents("orders/01.01.2024/branches")
            .await
            .unwrap();
        assert_eq!(docs[0].fields.len(), 32);
    }
}
