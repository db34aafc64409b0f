use sea_orm::sea_query::OnConflict;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::wishlist::{AddToWishlistRequest, MoveToWishlistResult, WishlistAddResult, WishlistView},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        products::Entity as Products,
        wishlist_items::{
            ActiveModel as WishlistItemActive, Column as WishlistItemCol,
            Entity as WishlistItems, Model as WishlistItemModel,
        },
        wishlists::{ActiveModel as WishlistActive, Column as WishlistCol, Entity as Wishlists, Model as WishlistModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::{
        cart_service::find_owned_for_update,
        line_items::{CollectionKind, LineItemRow, aggregate},
    },
    state::AppState,
};

pub const DEFAULT_WISHLIST_NAME: &str = "My Wishlist";

/// Returns the owner's wishlist, creating it on first access.
///
/// The unique constraint on `user_id` plus a no-op `ON CONFLICT DO UPDATE`
/// makes this one atomic statement that always returns the row.
pub async fn get_or_create_wishlist<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> AppResult<WishlistModel> {
    let active = WishlistActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(DEFAULT_WISHLIST_NAME.to_string()),
        created_at: NotSet,
    };

    let wishlist = Wishlists::insert(active)
        .on_conflict(
            OnConflict::column(WishlistCol::UserId)
                .update_column(WishlistCol::UserId)
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;
    Ok(wishlist)
}

/// Create-or-find for one (wishlist, product) membership. The flag is true
/// when this call inserted the row.
pub(crate) async fn upsert_wishlist_item<C: ConnectionTrait>(
    db: &C,
    wishlist_id: Uuid,
    product_id: Uuid,
) -> AppResult<(WishlistItemModel, bool)> {
    let id = Uuid::new_v4();
    let active = WishlistItemActive {
        id: Set(id),
        wishlist_id: Set(wishlist_id),
        product_id: Set(product_id),
        created_at: NotSet,
    };

    let item = WishlistItems::insert(active)
        .on_conflict(
            OnConflict::columns([WishlistItemCol::WishlistId, WishlistItemCol::ProductId])
                .update_column(WishlistItemCol::ProductId)
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    let created = item.id == id;
    Ok((item, created))
}

/// Read-only: an owner who never saved anything gets an empty view and no
/// wishlist row is created.
pub async fn view_wishlist(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<WishlistView>> {
    let wishlist = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?;

    let Some(wishlist) = wishlist else {
        return Ok(ApiResponse::success(
            "OK",
            WishlistView {
                wishlist: None,
                items: Vec::new(),
            },
            Some(Meta::count(0)),
        ));
    };

    let rows: Vec<LineItemRow> = WishlistItems::find()
        .filter(WishlistItemCol::WishlistId.eq(wishlist.id))
        .order_by_asc(WishlistItemCol::CreatedAt)
        .order_by_asc(WishlistItemCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(item, product)| {
            product.map(|product| LineItemRow {
                item_id: item.id,
                product: product.into(),
                quantity: 1,
            })
        })
        .collect();

    let view = aggregate(CollectionKind::Wishlist, rows);
    let count = view.items.len();

    Ok(ApiResponse::success(
        "OK",
        WishlistView {
            wishlist: Some(wishlist.into()),
            items: view.items,
        },
        Some(Meta::count(count)),
    ))
}

pub async fn add_to_wishlist(
    state: &AppState,
    user: &AuthUser,
    payload: AddToWishlistRequest,
) -> AppResult<ApiResponse<WishlistAddResult>> {
    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let wishlist = get_or_create_wishlist(&state.orm, user.user_id).await?;
    let (item, created) = upsert_wishlist_item(&state.orm, wishlist.id, payload.product_id).await?;

    if created {
        audit::record(
            &state.orm,
            user.user_id,
            "wishlist_add",
            "wishlist_items",
            serde_json::json!({ "product_id": payload.product_id }),
        )
        .await;
    }

    let message = if created {
        "Saved To Wishlist"
    } else {
        "Already in wishlist"
    };

    Ok(ApiResponse::success(
        message,
        WishlistAddResult {
            item: item.into(),
            created,
        },
        Some(Meta::none()),
    ))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let wishlist = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?;
    let wishlist = match wishlist {
        Some(w) => w,
        None => return Err(AppError::NotFound),
    };

    let result = WishlistItems::delete_many()
        .filter(
            Condition::all()
                .add(WishlistItemCol::WishlistId.eq(wishlist.id))
                .add(WishlistItemCol::ProductId.eq(product_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user.user_id,
        "wishlist_remove",
        "wishlist_items",
        serde_json::json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from wishlist",
        serde_json::json!({}),
        Some(Meta::none()),
    ))
}

/// Moves every cart item of the owner into their wishlist.
///
/// Each item migrates in its own transaction: the cart row is locked, the
/// wishlist membership upserted, then the cart row deleted. A failure stops
/// the move and leaves the current item in the cart; items already moved stay
/// moved. Re-running is a no-op for anything already migrated.
pub async fn move_cart_to_wishlist(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<MoveToWishlistResult>> {
    let wishlist = get_or_create_wishlist(&state.orm, user.user_id).await?;

    let items = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .order_by_asc(CartCol::Id)
        .all(&state.orm)
        .await?;

    let mut moved: u64 = 0;
    for item in items {
        match move_one(state, user.user_id, wishlist.id, item.id).await {
            Ok(Some(product_id)) => {
                tracing::debug!(
                    user_id = %user.user_id,
                    product_id = %product_id,
                    "cart item moved to wishlist"
                );
                moved += 1;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    item_id = %item.id,
                    moved,
                    error = %err,
                    "cart move stopped; item left in cart"
                );
                return Err(err);
            }
        }
    }

    if moved > 0 {
        audit::record(
            &state.orm,
            user.user_id,
            "cart_move_to_wishlist",
            "wishlist_items",
            serde_json::json!({ "wishlist_id": wishlist.id, "moved": moved }),
        )
        .await;
    }

    tracing::info!(user_id = %user.user_id, moved, "cart moved to wishlist");

    Ok(ApiResponse::success(
        "Moved cart to wishlist",
        MoveToWishlistResult {
            wishlist_id: wishlist.id,
            moved,
        },
        Some(Meta::none()),
    ))
}

/// Migrates one cart row inside its own transaction. `None` when the row is
/// already gone. On error the transaction is dropped and rolls back.
async fn move_one(
    state: &AppState,
    user_id: Uuid,
    wishlist_id: Uuid,
    item_id: Uuid,
) -> AppResult<Option<Uuid>> {
    let txn = state.orm.begin().await?;

    // a concurrent request may already have moved or removed it
    let Some(locked) = find_owned_for_update(&txn, user_id, item_id).await? else {
        txn.rollback().await?;
        return Ok(None);
    };

    upsert_wishlist_item(&txn, wishlist_id, locked.product_id).await?;
    CartItems::delete_by_id(locked.id).exec(&txn).await?;
    txn.commit().await?;
    Ok(Some(locked.product_id))
}
