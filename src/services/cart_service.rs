use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{
        AddToCartRequest, AdjustQuantityRequest, CartItemAdjustment, CartView, ClearCartResult,
        MAX_QUANTITY, QUANTITY_LIMIT_MESSAGE,
    },
    entity::{
        cart_items::{ActiveModel as CartActive, Column as CartCol, Entity as CartItems, Model as CartModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartItem,
    response::{ApiResponse, Meta},
    services::line_items::{CollectionKind, LineItemRow, aggregate},
    state::AppState,
};

pub async fn view_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let rows: Vec<LineItemRow> = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .order_by_asc(CartCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(item, product)| {
            product.map(|product| LineItemRow {
                item_id: item.id,
                product: product.into(),
                quantity: item.quantity,
            })
        })
        .collect();

    let view = aggregate(CollectionKind::Cart, rows);
    let count = view.items.len();
    let data = CartView {
        items: view.items,
        total_price: view.total.unwrap_or(Decimal::ZERO),
    };

    Ok(ApiResponse::success("OK", data, Some(Meta::count(count))))
}

/// Adds one unit of a product, creating the cart row on first add.
///
/// A single `INSERT .. ON CONFLICT DO UPDATE` keeps concurrent adds from
/// creating duplicate rows or losing increments. The update is guarded so a
/// row already at `MAX_QUANTITY` returns nothing and the add is refused.
pub async fn add_or_increment(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let active = CartActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        quantity: Set(1),
        created_at: NotSet,
    };

    let item = CartItems::insert(active)
        .on_conflict(
            OnConflict::columns([CartCol::UserId, CartCol::ProductId])
                .value(
                    CartCol::Quantity,
                    Expr::col((CartItems, CartCol::Quantity)).add(1),
                )
                .action_and_where(Expr::col((CartItems, CartCol::Quantity)).lt(MAX_QUANTITY))
                .to_owned(),
        )
        .exec_with_returning(&state.orm)
        .await
        .map_err(|err| match err {
            DbErr::RecordNotFound(_) => AppError::BadRequest(QUANTITY_LIMIT_MESSAGE.into()),
            other => other.into(),
        })?;

    tracing::debug!(
        user_id = %user.user_id,
        product_id = %item.product_id,
        quantity = item.quantity,
        "cart item added"
    );

    audit::record(
        &state.orm,
        user.user_id,
        "cart_add",
        "cart_items",
        serde_json::json!({ "product_id": item.product_id, "quantity": item.quantity }),
    )
    .await;

    Ok(ApiResponse::success("Added to cart", item.into(), None))
}

/// Increments or decrements one cart item, deleting it when the quantity
/// reaches zero.
///
/// The row is locked `FOR UPDATE` under an owner filter, so the ownership check,
/// the read and the write happen inside one transaction.
pub async fn adjust_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
    payload: AdjustQuantityRequest,
) -> AppResult<ApiResponse<CartItemAdjustment>> {
    let txn = state.orm.begin().await?;

    let item = find_owned_for_update(&txn, user.user_id, item_id).await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let Some(quantity) = payload.delta.apply(item.quantity) else {
        txn.rollback().await?;
        return Err(AppError::BadRequest(QUANTITY_LIMIT_MESSAGE.into()));
    };
    let product_id = item.product_id;

    let adjustment = if quantity <= 0 {
        CartItems::delete_by_id(item.id).exec(&txn).await?;
        CartItemAdjustment {
            item_id,
            product_id,
            quantity: 0,
            removed: true,
        }
    } else {
        let mut active: CartActive = item.into();
        active.quantity = Set(quantity);
        let updated = active.update(&txn).await?;
        CartItemAdjustment {
            item_id,
            product_id,
            quantity: updated.quantity,
            removed: false,
        }
    };

    txn.commit().await?;

    tracing::debug!(
        user_id = %user.user_id,
        item_id = %item_id,
        quantity = adjustment.quantity,
        removed = adjustment.removed,
        "cart item adjusted"
    );

    audit::record(
        &state.orm,
        user.user_id,
        if adjustment.removed { "cart_remove" } else { "cart_update" },
        "cart_items",
        serde_json::json!({ "item_id": item_id, "quantity": adjustment.quantity }),
    )
    .await;

    let message = if adjustment.removed {
        "Removed from cart"
    } else {
        "Quantity updated"
    };
    Ok(ApiResponse::success(message, adjustment, Some(Meta::none())))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CartItems::delete_many()
        .filter(
            Condition::all()
                .add(CartCol::Id.eq(item_id))
                .add(CartCol::UserId.eq(user.user_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user.user_id,
        "cart_remove",
        "cart_items",
        serde_json::json!({ "item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::none()),
    ))
}

pub async fn clear_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ClearCartResult>> {
    let result = CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected > 0 {
        audit::record(
            &state.orm,
            user.user_id,
            "cart_clear",
            "cart_items",
            serde_json::json!({ "removed": result.rows_affected }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Cart cleared",
        ClearCartResult {
            removed: result.rows_affected,
        },
        Some(Meta::none()),
    ))
}

pub(crate) async fn find_owned_for_update<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    item_id: Uuid,
) -> AppResult<Option<CartModel>> {
    let item = CartItems::find()
        .filter(
            Condition::all()
                .add(CartCol::Id.eq(item_id))
                .add(CartCol::UserId.eq(user_id)),
        )
        .lock(LockType::Update)
        .one(db)
        .await?;
    Ok(item)
}
