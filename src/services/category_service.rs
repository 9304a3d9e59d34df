use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::categories::{CategoryForm, CategoryList, CategoryPayload, IMAGE_POLICY},
    entity::categories::{
        ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
    },
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Empty},
    state::AppState,
    validation::validate_request,
};

const NOT_FOUND: &str = "Category Not Found";

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let categories: Vec<Category> = Categories::find()
        .order_by_asc(CategoryCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList {
            count: categories.len(),
            categories,
        },
    ))
}

pub async fn get_category(state: &AppState, id: i64) -> AppResult<ApiResponse<CategoryPayload>> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success(
        "Category",
        CategoryPayload {
            category: category.into(),
        },
    ))
}

pub async fn create_category(
    state: &AppState,
    form: CategoryForm,
) -> AppResult<ApiResponse<CategoryPayload>> {
    validate_request(&form, &state.orm, None).await?;
    let (name, image) = form.into_parts()?;

    let stored = state.images.store(&image, &IMAGE_POLICY).await?;
    let inserted = CategoryActive {
        id: NotSet,
        name: Set(name),
        image: Set(stored.clone()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await;

    let category = match inserted {
        Ok(category) => category,
        Err(err) => {
            discard_image(state, &stored).await;
            return Err(err.into());
        }
    };

    tracing::info!(category_id = category.id, image = %category.image, "category created");
    audit::record(
        &state.pool,
        None,
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product category created successfully",
        CategoryPayload {
            category: category.into(),
        },
    ))
}

/// Replace name and image. The old file is removed only after the row points at the new one.
pub async fn update_category(
    state: &AppState,
    id: i64,
    form: CategoryForm,
) -> AppResult<ApiResponse<CategoryPayload>> {
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    validate_request(&form, &state.orm, Some(id)).await?;
    let (name, image) = form.into_parts()?;

    let stored = state.images.store(&image, &IMAGE_POLICY).await?;
    let previous_image = existing.image.clone();

    let mut active: CategoryActive = existing.into();
    active.name = Set(name);
    active.image = Set(stored.clone());
    active.updated_at = Set(Utc::now().into());

    let category = match active.update(&state.orm).await {
        Ok(category) => category,
        Err(err) => {
            discard_image(state, &stored).await;
            return Err(err.into());
        }
    };

    discard_image(state, &previous_image).await;

    tracing::info!(category_id = category.id, "category updated");
    audit::record(
        &state.pool,
        None,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id, "replaced_image": previous_image }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category updated successfully",
        CategoryPayload {
            category: category.into(),
        },
    ))
}

pub async fn delete_category(state: &AppState, id: i64) -> AppResult<ApiResponse<Empty>> {
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    discard_image(state, &existing.image).await;

    tracing::info!(category_id = id, "category deleted");
    audit::record(
        &state.pool,
        None,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::message("Category Deleted Successfully"))
}

async fn discard_image(state: &AppState, name: &str) {
    if let Err(err) = state.images.remove(name).await {
        tracing::warn!(error = %err, file = %name, "failed to remove stored image");
    }
}
