use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;

use crate::{
    audit,
    dto::products::{ProductList, ProductPayload, ProductRequest, ProductSearch},
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Empty},
    state::AppState,
    validation::validate_request,
};

const NOT_FOUND: &str = "Product Not Found";

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let products: Vec<Product> = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductList {
            count: products.len(),
            products,
        },
    ))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<ProductPayload>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success(
        "Product",
        ProductPayload {
            product: product.into(),
        },
    ))
}

/// Case-insensitive substring match on the product name. No match is still a 200.
pub async fn search_products(
    state: &AppState,
    name: &str,
) -> AppResult<ApiResponse<ProductSearch>> {
    let pattern = format!("%{}%", escape_like(name.trim()));
    let products = Products::find()
        .filter(Expr::col(Column::Name).ilike(pattern))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success("Products", ProductSearch { products }))
}

pub async fn create_product(
    state: &AppState,
    payload: ProductRequest,
) -> AppResult<ApiResponse<ProductPayload>> {
    validate_request(&payload, &state.orm, None).await?;
    let fields = payload.into_fields()?;

    let active = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        description: Set(fields.description),
        price: Set(fields.price),
        image: Set(fields.image),
        kind: Set(fields.kind),
        quantity: Set(fields.quantity),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = product.id, "product created");
    audit::record(
        &state.pool,
        None,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created successfully",
        ProductPayload {
            product: product.into(),
        },
    ))
}

/// Full overwrite under the same rules as create.
pub async fn update_product(
    state: &AppState,
    id: i64,
    payload: ProductRequest,
) -> AppResult<ApiResponse<ProductPayload>> {
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    validate_request(&payload, &state.orm, Some(id)).await?;
    let fields = payload.into_fields()?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.price = Set(fields.price);
    active.image = Set(fields.image);
    active.kind = Set(fields.kind);
    active.quantity = Set(fields.quantity);
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    tracing::info!(product_id = product.id, "product updated");
    audit::record(
        &state.pool,
        None,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product updated successfully",
        ProductPayload {
            product: product.into(),
        },
    ))
}

pub async fn delete_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Empty>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!(product_id = id, "product deleted");
    audit::record(
        &state.pool,
        None,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::message("Product Deleted Successfully"))
}

/// Make `%`, `_` and `\` in user input match literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
