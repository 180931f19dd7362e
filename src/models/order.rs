use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 产品名 -> 数量 (字符串形式的数字)
pub type ProductQuantities = IndexMap<String, String>;

/// 汇总伪分店的 ID
pub const TOTAL_BRANCH_ID: &str = "total";
/// 汇总伪分店的名称
pub const TOTAL_BRANCH_NAME: &str = "Total Across All Branches";

/// 某分店在某一天 (或某个日期区间) 的产品数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub branch_id: String,
    pub branch_name: String,
    /// 单日 "dd.mm.yyyy" 或区间 "dd.mm.yyyy - dd.mm.yyyy"
    #[serde(rename = "date")]
    pub date_label: String,
    pub products: ProductQuantities,
}

impl Order {
    pub fn new(
        branch_id: impl Into<String>,
        branch_name: impl Into<String>,
        date_label: impl Into<String>,
        products: ProductQuantities,
    ) -> Self {
        Self {
            branch_id: branch_id.into(),
            branch_name: branch_name.into(),
            date_label: date_label.into(),
            products,
        }
    }

    pub fn is_total(&self) -> bool {
        self.branch_id == TOTAL_BRANCH_ID
    }
}

/// 写入请求: 单个分店单个产品的数量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub branch: String,
    pub product: String,
    pub quantity: String,
}

impl OrderItem {
    /// 校验分店和产品名，分店 ID 会成为文档路径的一段
    pub fn validate(&self) -> Result<(), String> {
        if self.branch.trim().is_empty() {
            return Err("branch must not be empty".to_string());
        }
        if self.branch.contains('/') {
            return Err(format!("branch `{}` must not contain '/'", self.branch));
        }
        if self.product.trim().is_empty() {
            return Err("product must not be empty".to_string());
        }
        Ok(())
    }
}
