pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, router};

use crate::service::{BranchService, OrderService};
use crate::store::DocumentStore;
use std::sync::Arc;

/// 共享状态：分店服务与订单服务共用同一个存储句柄
pub struct AppState<S> {
    pub branches: Arc<BranchService<S>>,
    pub orders: Arc<OrderService<S>>,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(store: Arc<S>, fetch_concurrency: usize) -> Self {
        Self {
            branches: Arc::new(BranchService::new(store.clone())),
            orders: Arc::new(OrderService::new(store, fetch_concurrency)),
        }
    }
}

// 手写 Clone，避免 derive 要求 S: Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            branches: self.branches.clone(),
            orders: self.orders.clone(),
        }
    }
}
