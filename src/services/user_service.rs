use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::auth::{UpdateUserRequest, UserList, UserPayload},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Empty},
    services::auth_service::hash_password,
    state::AppState,
    validation::validate_request,
};

const NOT_FOUND: &str = "User Not Found";

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let users: Vec<User> = Users::find()
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList {
            count: users.len(),
            users,
        },
    ))
}

pub async fn get_user(state: &AppState, id: i64) -> AppResult<ApiResponse<UserPayload>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success("User", UserPayload { user: user.into() }))
}

pub async fn current_user(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<ApiResponse<UserPayload>> {
    let user = Users::find_by_id(auth.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(ApiResponse::success("User", UserPayload { user: user.into() }))
}

/// Full overwrite, password included.
pub async fn update_user(
    state: &AppState,
    id: i64,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<UserPayload>> {
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    validate_request(&payload, &state.orm, Some(id)).await?;
    let fields = payload.into_fields()?;

    let mut active: UserActive = existing.into();
    active.name = Set(fields.name);
    active.email = Set(fields.email);
    active.password_hash = Set(hash_password(&fields.password)?);
    active.updated_at = Set(Utc::now().into());
    let user = active.update(&state.orm).await?;

    tracing::info!(user_id = user.id, "user updated");
    audit::record(
        &state.pool,
        None,
        "user_update",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User updated successfully",
        UserPayload { user: user.into() },
    ))
}

pub async fn delete_user(state: &AppState, id: i64) -> AppResult<ApiResponse<Empty>> {
    let result = Users::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!(user_id = id, "user deleted");
    audit::record(
        &state.pool,
        None,
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::message("User Deleted Successfully"))
}
