use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::orders::{OrderList, OrderPayload, OrderRequest},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    error::{AppError, AppResult},
    models::Order,
    response::{ApiResponse, Empty},
    state::AppState,
    validation::validate_request,
};

const NOT_FOUND: &str = "Order Not Found";

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let orders: Vec<Order> = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList {
            count: orders.len(),
            orders,
        },
    ))
}

pub async fn get_order(state: &AppState, id: i64) -> AppResult<ApiResponse<OrderPayload>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success("Order", OrderPayload { order: order.into() }))
}

pub async fn create_order(
    state: &AppState,
    payload: OrderRequest,
) -> AppResult<ApiResponse<OrderPayload>> {
    validate_request(&payload, &state.orm, None).await?;
    let fields = payload.into_fields()?;

    let order = OrderActive {
        id: NotSet,
        client_name: Set(fields.client_name),
        total_price: Set(fields.total_price),
        payment_mode: Set(fields.payment_mode),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = order.id, "order created");
    audit::record(
        &state.pool,
        None,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success("Order Created", OrderPayload { order: order.into() }))
}

pub async fn update_order(
    state: &AppState,
    id: i64,
    payload: OrderRequest,
) -> AppResult<ApiResponse<OrderPayload>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    validate_request(&payload, &state.orm, Some(id)).await?;
    let fields = payload.into_fields()?;

    let mut active: OrderActive = existing.into();
    active.client_name = Set(fields.client_name);
    active.total_price = Set(fields.total_price);
    active.payment_mode = Set(fields.payment_mode);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(order_id = order.id, "order updated");
    audit::record(
        &state.pool,
        None,
        "order_update",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success("Order Updated", OrderPayload { order: order.into() }))
}

pub async fn delete_order(state: &AppState, id: i64) -> AppResult<ApiResponse<Empty>> {
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!(order_id = id, "order deleted");
    audit::record(
        &state.pool,
        None,
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    Ok(ApiResponse::message("Order Deleted"))
}
