use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::categories::{CategoryForm, CategoryList, CategoryPayload, CategoryUpload},
    error::AppResult,
    response::{ApiResponse, Empty, ErrorBody},
    services::category_service,
    state::AppState,
};

/// Multipart bodies may carry an image of up to 2 MB plus form overhead.
const UPLOAD_BODY_LIMIT: usize = 4 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/store", post(create_category))
        .route("/show", get(list_categories))
        .route("/show/{id}", get(get_category))
        .route("/update/{id}", put(update_category))
        .route("/delete/{id}", delete(delete_category))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[utoipa::path(
    get,
    path = "/api/category/show",
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/category/show/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<CategoryPayload>),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CategoryPayload>>> {
    let resp = category_service::get_category(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/category/store",
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Create category", body = ApiResponse<CategoryPayload>),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<CategoryPayload>>)> {
    let form = CategoryForm::from_multipart(multipart).await?;
    let resp = category_service::create_category(&state, form).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/category/update/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<CategoryPayload>),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<CategoryPayload>>> {
    let form = CategoryForm::from_multipart(multipart).await?;
    let resp = category_service::update_category(&state, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/category/delete/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Deleted category", body = ApiResponse<Empty>),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = category_service::delete_category(&state, id).await?;
    Ok(Json(resp))
}
