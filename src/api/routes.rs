use super::{handlers, AppState};
use crate::store::DocumentStore;
use axum::http::Method;
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// 构建路由
pub fn router<S: DocumentStore>(state: AppState<S>) -> Router {
    let api = Router::new()
        .route("/api/branches", get(handlers::get_all_branches::<S>))
        .route("/api/orders/date/:date", get(handlers::get_orders_by_date::<S>))
        .route(
            "/api/orders",
            get(handlers::get_orders_for_date_range::<S>).post(handlers::add_order::<S>),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}

/// 跨域配置：回显请求来源和请求头，允许携带凭证，预检缓存 1 小时
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
