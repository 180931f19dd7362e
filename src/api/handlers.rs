use super::AppState;
use crate::dates;
use crate::error::ServiceError;
use crate::models::{Branch, Order, OrderItem};
use crate::store::DocumentStore;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;

/// 区间查询参数 (yyyy-mm-dd)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// 写入请求的日期参数 (yyyy-mm-dd)
#[derive(Debug, Deserialize)]
pub struct AddOrderQuery {
    pub date: NaiveDate,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::InvalidOrderItem(reason) => {
                tracing::warn!("Rejected order item: {}", reason);
                (StatusCode::BAD_REQUEST, reason).into_response()
            }
            ServiceError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /api/branches
pub async fn get_all_branches<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Branch>>, ServiceError> {
    let branches = state.branches.get_all_branches().await?;
    tracing::info!("Returning {} branches", branches.len());
    Ok(Json(branches))
}

/// GET /api/orders/date/{date}
pub async fn get_orders_by_date<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<Order>>, ServiceError> {
    tracing::info!("Received request for orders on date: {}", date);
    let orders = state.orders.get_orders_by_date(date).await?;
    tracing::info!("Returning {} orders for date {}", orders.len(), date);
    Ok(Json(orders))
}

/// GET /api/orders?startDate=..&endDate=..
pub async fn get_orders_for_date_range<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<IndexMap<String, Vec<Order>>>, ServiceError> {
    tracing::info!(
        "Received request for orders between {} and {}",
        range.start_date,
        range.end_date
    );
    let orders = state
        .orders
        .get_orders_for_date_range(range.start_date, range.end_date)
        .await?;
    tracing::info!("Returning orders for {} date ranges", orders.len());
    Ok(Json(orders))
}

/// POST /api/orders?date=..
pub async fn add_order<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<AddOrderQuery>,
    Json(item): Json<OrderItem>,
) -> Result<&'static str, ServiceError> {
    tracing::info!(
        "Received request to add order for date: {} branch: {} product: {}",
        query.date,
        item.branch,
        item.product
    );
    let date_label = dates::format_date(query.date);
    state.orders.add_order(&date_label, &item).await?;
    Ok("Order added successfully")
}
