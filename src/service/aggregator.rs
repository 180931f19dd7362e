use super::quantity::{format_quantity, parse_quantity};
use crate::models::{Order, ProductQuantities, TOTAL_BRANCH_ID, TOTAL_BRANCH_NAME};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// 日期区间聚合器
///
/// 按日期顺序逐天喂入单日订单，维护两份累加状态:
/// - 分店维度: 每个分店一份合并后的订单
/// - 全局维度: 所有分店所有日期的产品总量
pub struct RangeAggregator {
    label: String,
    merged: IndexMap<String, Order>,
    totals: IndexMap<String, f64>,
}

impl RangeAggregator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            merged: IndexMap::new(),
            totals: IndexMap::new(),
        }
    }

    /// 合并一张单日订单
    pub fn absorb(&mut self, order: Order) {
        // 1. 全局汇总: 始终解析后求和
        for (product, quantity) in &order.products {
            *self.totals.entry(product.clone()).or_insert(0.0) += parse_quantity(quantity);
        }

        // 2. 分店汇总
        match self.merged.entry(order.branch_id) {
            Entry::Occupied(mut existing) => {
                let existing_products = &mut existing.get_mut().products;
                for (product, quantity) in order.products {
                    match existing_products.get_mut(&product) {
                        Some(current) => {
                            let sum = parse_quantity(current) + parse_quantity(&quantity);
                            *current = format_quantity(sum);
                        }
                        // 首次出现的产品原样保留字符串，不做规范化
                        None => {
                            existing_products.insert(product, quantity);
                        }
                    }
                }
            }
            Entry::Vacant(slot) => {
                let branch_id = slot.key().clone();
                slot.insert(Order::new(
                    branch_id,
                    order.branch_name,
                    self.label.clone(),
                    order.products,
                ));
            }
        }
    }

    /// 是否尚未合并任何分店
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// 输出 { 区间标签: [各分店..., total] }，没有任何分店数据时返回空 Map
    pub fn finish(self) -> IndexMap<String, Vec<Order>> {
        let mut result = IndexMap::new();
        if self.merged.is_empty() {
            return result;
        }

        let totals: ProductQuantities = self
            .totals
            .into_iter()
            .map(|(product, sum)| (product, format_quantity(sum)))
            .collect();

        let mut orders: Vec<Order> = self.merged.into_values().collect();
        orders.push(Order::new(
            TOTAL_BRANCH_ID,
            TOTAL_BRANCH_NAME,
            self.label.clone(),
            totals,
        ));

        result.insert(self.label, orders);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "01.01.2024 - 02.01.2024";

    fn day_order(branch: &str, pairs: &[(&str, &str)]) -> Order {
        let products = pairs
            .iter()
            .map(|(p, q)| (p.to_string(), q.to_string()))
            .collect();
        Order::new(branch, branch, "01.01.2024", products)
    }

    fn quantity<'a>(order: &'a Order, product: &str) -> Option<&'a str> {
        order.products.get(product).map(String::as_str)
    }

    #[test]
    fn empty_aggregation_has_no_total() {
        let aggregator = RangeAggregator::new(LABEL);
        assert!(aggregator.is_empty());
        assert!(aggregator.finish().is_empty());
    }

    #[test]
    fn disjoint_products_are_unioned_verbatim() {
        let mut aggregator = RangeAggregator::new(LABEL);
        aggregator.absorb(day_order("a", &[("sugar", "5 kg")]));
        aggregator.absorb(day_order("a", &[("salt", "02")]));

        let result = aggregator.finish();
        let orders = &result[LABEL];
        assert_eq!(orders.len(), 2);

        let branch = &orders[0];
        assert_eq!(branch.branch_id, "a");
        assert_eq!(branch.date_label, LABEL);
        assert_eq!(quantity(branch, "sugar"), Some("5 kg"));
        assert_eq!(quantity(branch, "salt"), Some("02"));
    }

    #[test]
    fn overlapping_products_are_summed() {
        let mut aggregator = RangeAggregator::new(LABEL);
        aggregator.absorb(day_order("a", &[("sugar", "5")]));
        aggregator.absorb(day_order("a", &[("sugar", "3")]));

        let result = aggregator.finish();
        let orders = &result[LABEL];
        assert_eq!(quantity(&orders[0], "sugar"), Some("8.0"));

        let total = orders.last().unwrap();
        assert!(total.is_total());
        assert_eq!(total.branch_name, TOTAL_BRANCH_NAME);
        assert_eq!(quantity(total, "sugar"), Some("8.0"));
    }

    #[test]
    fn malformed_quantities_count_as_zero() {
        let mut aggregator = RangeAggregator::new(LABEL);
        aggregator.absorb(day_order("a", &[("sugar", "lots")]));
        aggregator.absorb(day_order("a", &[("sugar", "4")]));

        let result = aggregator.finish();
        let orders = &result[LABEL];
        assert_eq!(quantity(&orders[0], "sugar"), Some("4.0"));
        assert_eq!(quantity(&orders[1], "sugar"), Some("4.0"));
    }

    #[test]
    fn total_always_reserializes() {
        let mut aggregator = RangeAggregator::new(LABEL);
        aggregator.absorb(day_order("a", &[("salt", "2")]));

        let result = aggregator.finish();
        let orders = &result[LABEL];
        // 分店保留原字符串，汇总重新格式化
        assert_eq!(quantity(&orders[0], "salt"), Some("2"));
        assert_eq!(quantity(&orders[1], "salt"), Some("2.0"));
    }

    #[test]
    fn branches_keep_first_seen_order_and_total_is_last() {
        let mut aggregator = RangeAggregator::new(LABEL);
        aggregator.absorb(day_order("b", &[("salt", "1")]));
        aggregator.absorb(day_order("a", &[("salt", "1")]));
        aggregator.absorb(day_order("b", &[("salt", "1")]));

        let result = aggregator.finish();
        let ids: Vec<&str> = result[LABEL].iter().map(|o| o.branch_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", TOTAL_BRANCH_ID]);
        assert_eq!(quantity(result[LABEL].last().unwrap(), "salt"), Some("3.0"));
    }
}
