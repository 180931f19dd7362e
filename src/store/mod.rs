//! 文档存储网关
//!
//! 数据按 "集合/文档" 组织，与原 Firestore 结构一致:
//! - `branches/{branchId}`: `{ name }`
//! - `orders/{dd.mm.yyyy}/branches/{branchId}`: `{ 产品名: 数量 }`

pub mod memory;
pub mod postgres;

use crate::error::StoreError;
use indexmap::IndexMap;
use std::future::Future;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// 已校验的文档字段: 字段名 -> 字符串值
pub type FieldMap = IndexMap<String, String>;

/// 分店集合
pub const BRANCHES_COLLECTION: &str = "branches";

/// 某天的分店订单集合路径
pub fn order_branches_collection(date_label: &str) -> String {
    format!("orders/{}/branches", date_label)
}

/// 某天某分店的订单文档路径
pub fn order_branch_document(date_label: &str, branch_id: &str) -> String {
    format!("{}/{}", order_branches_collection(date_label), branch_id)
}

/// 集合中的一个文档
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: FieldMap,
}

/// 文档存储抽象
pub trait DocumentStore: Send + Sync + 'static {
    /// 列出集合下的所有文档，按文档 ID 升序
    fn list_child_documents<'a>(
        &'a self,
        collection_path: &'a str,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send + 'a;

    /// 字段级合并写入 (原子)，未出现的字段保持不变；文档不存在时创建
    fn merge_fields<'a>(
        &'a self,
        document_path: &'a str,
        fields: &'a FieldMap,
    ) -> impl Future<Output = Result<(), StoreError>> + Send + 'a;

    /// 释放底层资源
    fn close(&self) -> impl Future<Output = ()> + Send;
}

/// 将文档路径拆分为 (集合路径, 文档 ID)
///
/// 路径必须由非空段组成，且段数为偶数 (集合/文档 成对)。
pub fn split_document_path(document_path: &str) -> Result<(&str, &str), StoreError> {
    let segments = document_path.split('/').count();
    let valid = segments >= 2
        && segments % 2 == 0
        && document_path.split('/').all(|s| !s.is_empty());
    if !valid {
        return Err(StoreError::InvalidPath(document_path.to_string()));
    }

    document_path
        .rsplit_once('/')
        .ok_or_else(|| StoreError::InvalidPath(document_path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_order_paths() {
        assert_eq!(order_branches_collection("01.02.2024"), "orders/01.02.2024/branches");
        assert_eq!(
            order_branch_document("01.02.2024", "moda"),
            "orders/01.02.2024/branches/moda"
        );
    }

    #[test]
    fn splits_document_path() {
        assert_eq!(
            split_document_path("orders/01.02.2024/branches/moda").unwrap(),
            ("orders/01.02.2024/branches", "moda")
        );
        assert_eq!(split_document_path("branches/moda").unwrap(), ("branches", "moda"));
    }

    #[test]
    fn rejects_collection_and_malformed_paths() {
        assert!(split_document_path("branches").is_err());
        assert!(split_document_path("orders/01.02.2024/branches").is_err());
        assert!(split_document_path("branches//x/y").is_err());
        assert!(split_document_path("branches/").is_err());
    }
}
