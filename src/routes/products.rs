use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::products::{ProductList, ProductPayload, ProductRequest, ProductSearch},
    error::AppResult,
    extract::Payload,
    response::{ApiResponse, Empty, ErrorBody},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/store", post(create_product))
        .route("/show", get(list_products))
        .route("/show/{id}", get(get_product))
        .route("/update/{id}", put(update_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/search/{name}", get(search_products))
}

#[utoipa::path(
    get,
    path = "/api/product/show",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/show/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductPayload>),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ProductPayload>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/search/{name}",
    params(
        ("name" = String, Path, description = "Part of the product name, case-insensitive")
    ),
    responses(
        (
            status = 200,
            description = "Matching products, possibly none",
            body = ApiResponse<ProductSearch>
        )
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<ProductSearch>>> {
    let resp = product_service::search_products(&state, &name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/product/store",
    request_body(
        content(
            (ProductRequest = "application/json"),
            (ProductRequest = "application/x-www-form-urlencoded"),
            (ProductRequest = "multipart/form-data")
        )
    ),
    responses(
        (status = 201, description = "Create product", body = ApiResponse<ProductPayload>),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Payload(payload): Payload<ProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductPayload>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/product/update/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body(
        content(
            (ProductRequest = "application/json"),
            (ProductRequest = "application/x-www-form-urlencoded"),
            (ProductRequest = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<ProductPayload>),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Payload(payload): Payload<ProductRequest>,
) -> AppResult<Json<ApiResponse<ProductPayload>>> {
    let resp = product_service::update_product(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/product/delete/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Empty>),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = product_service::delete_product(&state, id).await?;
    Ok(Json(resp))
}
