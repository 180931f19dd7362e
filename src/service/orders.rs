use super::aggregator::RangeAggregator;
use crate::dates;
use crate::error::{ServiceError, StoreError};
use crate::models::{Order, OrderItem};
use crate::store::{self, DocumentStore, FieldMap};
use chrono::NaiveDate;
use futures::{stream, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use std::sync::Arc;

/// 订单服务: 单日查询、区间聚合、写入
pub struct OrderService<S> {
    store: Arc<S>,
    fetch_concurrency: usize,
}

impl<S: DocumentStore> OrderService<S> {
    pub fn new(store: Arc<S>, fetch_concurrency: usize) -> Self {
        Self {
            store,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// 查询某一天各分店的订单
    pub async fn get_orders_by_date(&self, date: NaiveDate) -> Result<Vec<Order>, ServiceError> {
        let label = dates::format_date(date);
        Ok(self.orders_for_label(label).await?)
    }

    /// 查询日期区间内的订单，按分店合并并附加 total 汇总
    pub async fn get_orders_for_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IndexMap<String, Vec<Order>>, ServiceError> {
        let day_labels = dates::date_strings_in_range(start, end);
        let range_label = dates::range_label(start, end);
        tracing::debug!("Aggregating {} day(s) for {}", day_labels.len(), range_label);

        // 并发拉取，buffered 按输入顺序产出，保证合并顺序与日期顺序一致
        let fetches: Vec<_> = day_labels
            .into_iter()
            .map(|label| self.orders_for_label(label))
            .collect();
        let days: Vec<Vec<Order>> = stream::iter(fetches)
            .buffered(self.fetch_concurrency)
            .try_collect()
            .await?;

        let mut aggregator = RangeAggregator::new(range_label);
        for order in days.into_iter().flatten() {
            aggregator.absorb(order);
        }
        Ok(aggregator.finish())
    }

    /// 写入单个产品数量，按字段合并，不影响同一分店当天的其他产品
    pub async fn add_order(&self, date_label: &str, item: &OrderItem) -> Result<(), ServiceError> {
        item.validate().map_err(ServiceError::InvalidOrderItem)?;

        let path = store::order_branch_document(date_label, &item.branch);
        let mut fields = FieldMap::with_capacity(1);
        fields.insert(item.product.clone(), item.quantity.clone());

        self.store.merge_fields(&path, &fields).await?;
        tracing::info!(
            "Order stored: date={} branch={} product={} quantity={}",
            date_label,
            item.branch,
            item.product,
            item.quantity
        );
        Ok(())
    }

    async fn orders_for_label(&self, label: String) -> Result<Vec<Order>, StoreError> {
        let collection = store::order_branches_collection(&label);
        let documents = self.store.list_child_documents(&collection).await?;

        Ok(documents
            .into_iter()
            .map(|doc| Order::new(doc.id.clone(), doc.id, label.clone(), doc.fields))
            .collect())
    }
}
