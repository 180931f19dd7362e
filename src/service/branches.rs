use crate::error::ServiceError;
use crate::models::Branch;
use crate::store::{DocumentStore, BRANCHES_COLLECTION};
use std::sync::Arc;

/// 分店服务
pub struct BranchService<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> BranchService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 查询全部分店
    pub async fn get_all_branches(&self) -> Result<Vec<Branch>, ServiceError> {
        let documents = self.store.list_child_documents(BRANCHES_COLLECTION).await?;

        Ok(documents
            .into_iter()
            .map(|mut doc| {
                let name = match doc.fields.swap_remove("name") {
                    Some(name) => name,
                    None => {
                        tracing::warn!("Branch {} has no name, falling back to its id", doc.id);
                        doc.id.clone()
                    }
                };
                Branch { id: doc.id, name }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FieldMap, MemoryDocumentStore};

    #[tokio::test]
    async fn lists_branches_with_name_fallback() {
        let store = Arc::new(MemoryDocumentStore::new());
        let mut named = FieldMap::new();
        named.insert("name".to_string(), "Kadıköy".to_string());
        named.insert("city".to_string(), "İstanbul".to_string());
        store.merge_fields("branches/kadikoy", &named).await.unwrap();

        let mut unnamed = FieldMap::new();
        unnamed.insert("city".to_string(), "Ankara".to_string());
        store.merge_fields("branches/cankaya", &unnamed).await.unwrap();

        let branches = BranchService::new(store).get_all_branches().await.unwrap();
        assert_eq!(
            branches,
            vec![
                Branch { id: "cankaya".to_string(), name: "cankaya".to_string() },
                Branch { id: "kadikoy".to_string(), name: "Kadıköy".to_string() },
            ]
        );
    }
}
