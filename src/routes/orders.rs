use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::orders::{OrderList, OrderPayload, OrderRequest},
    error::AppResult,
    extract::Payload,
    response::{ApiResponse, Empty, ErrorBody},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_orders))
        .route("/store", post(create_order))
        .route("/show/{id}", get(get_order))
        .route("/update/{id}", put(update_order))
        .route("/delete/{id}", delete(delete_order))
}

#[utoipa::path(
    get,
    path = "/api/orders/list",
    responses(
        (status = 200, description = "List orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/store",
    request_body(
        content(
            (OrderRequest = "application/json"),
            (OrderRequest = "application/x-www-form-urlencoded"),
            (OrderRequest = "multipart/form-data")
        )
    ),
    responses(
        (status = 201, description = "Create order", body = ApiResponse<OrderPayload>),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Payload(payload): Payload<OrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderPayload>>)> {
    let resp = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/show/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Get order", body = ApiResponse<OrderPayload>),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderPayload>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/orders/update/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    request_body(
        content(
            (OrderRequest = "application/json"),
            (OrderRequest = "application/x-www-form-urlencoded"),
            (OrderRequest = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Updated order", body = ApiResponse<OrderPayload>),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Payload(payload): Payload<OrderRequest>,
) -> AppResult<Json<ApiResponse<OrderPayload>>> {
    let resp = order_service::update_order(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/delete/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Deleted order", body = ApiResponse<Empty>),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = order_service::delete_order(&state, id).await?;
    Ok(Json(resp))
}
