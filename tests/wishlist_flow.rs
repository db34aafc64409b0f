mod common;

use axum_storefront::{
    dto::{cart::AddToCartRequest, wishlist::AddToWishlistRequest},
    entity::wishlists::{Column as WishlistCol, Entity as Wishlists},
    error::AppError,
    services::{cart_service, wishlist_service},
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use common::{create_product, create_user, setup_state};

#[tokio::test]
async fn adding_twice_keeps_one_wishlist_item() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let product = create_product(&state, "Dagger", Decimal::new(500, 2)).await?;

    let first = wishlist_service::add_to_wishlist(
        &state,
        &user,
        AddToWishlistRequest {
            product_id: product.id,
        },
    )
    .await?;
    let second = wishlist_service::add_to_wishlist(
        &state,
        &user,
        AddToWishlistRequest {
            product_id: product.id,
        },
    )
    .await?;

    let first = first.data.expect("first");
    let second = second.data.expect("second");
    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.item.id, second.item.id);

    let view = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.wishlist.expect("wishlist").user_id, user.user_id);
    Ok(())
}

#[tokio::test]
async fn wishlist_is_created_once_per_user() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;

    let a = wishlist_service::get_or_create_wishlist(&state.orm, user.user_id).await?;
    let b = wishlist_service::get_or_create_wishlist(&state.orm, user.user_id).await?;

    assert_eq!(a.id, b.id);
    assert_eq!(a.name, wishlist_service::DEFAULT_WISHLIST_NAME);
    Ok(())
}

#[tokio::test]
async fn wishlist_orders_by_price() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let cheap = create_product(&state, "Pebble", Decimal::new(10, 2)).await?;
    let dear = create_product(&state, "Crown", Decimal::new(90000, 2)).await?;

    for product_id in [cheap.id, dear.id] {
        wishlist_service::add_to_wishlist(&state, &user, AddToWishlistRequest { product_id })
            .await?;
    }

    let view = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    let ids: Vec<_> = view.items.iter().map(|i| i.product.id).collect();
    assert_eq!(ids, vec![dear.id, cheap.id]);
    Ok(())
}

#[tokio::test]
async fn move_cart_to_wishlist_is_idempotent() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let sword = create_product(&state, "Sword", Decimal::new(1500, 2)).await?;
    let shield = create_product(&state, "Shield", Decimal::new(2000, 2)).await?;

    // shield is already wishlisted, so moving it must not duplicate it
    wishlist_service::add_to_wishlist(
        &state,
        &user,
        AddToWishlistRequest {
            product_id: shield.id,
        },
    )
    .await?;
    for product_id in [sword.id, sword.id, shield.id] {
        cart_service::add_or_increment(&state, &user, AddToCartRequest { product_id }).await?;
    }

    let first = wishlist_service::move_cart_to_wishlist(&state, &user)
        .await?
        .data
        .expect("moved");
    assert_eq!(first.moved, 2);

    let second = wishlist_service::move_cart_to_wishlist(&state, &user)
        .await?
        .data
        .expect("moved");
    assert_eq!(second.moved, 0);
    assert_eq!(second.wishlist_id, first.wishlist_id);

    let cart = cart_service::view_cart(&state, &user).await?.data.expect("cart");
    assert!(cart.items.is_empty());

    let view = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    let ids: Vec<_> = view.items.iter().map(|i| i.product.id).collect();
    assert_eq!(ids, vec![shield.id, sword.id]);
    Ok(())
}

#[tokio::test]
async fn removing_missing_wishlist_item_is_not_found() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let product = create_product(&state, "Lute", Decimal::new(800, 2)).await?;

    let missing = wishlist_service::remove_from_wishlist(&state, &user, product.id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    wishlist_service::add_to_wishlist(
        &state,
        &user,
        AddToWishlistRequest {
            product_id: product.id,
        },
    )
    .await?;
    wishlist_service::remove_from_wishlist(&state, &user, product.id).await?;

    let view = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    assert!(view.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn viewing_wishlist_does_not_create_one() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;

    let view = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    assert!(view.wishlist.is_none());
    assert!(view.items.is_empty());

    let rows = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(rows, 0);
    Ok(())
}

/// Makes every wishlist insert of `product_id` fail until dropped.
async fn refuse_wishlist_inserts(
    state: &AppState,
    name: &str,
    product_id: Uuid,
) -> anyhow::Result<()> {
    state
        .orm
        .execute_unprepared(&format!(
            "CREATE FUNCTION {name}() RETURNS trigger LANGUAGE plpgsql AS $$ \
             BEGIN \
                 IF NEW.product_id = '{product_id}' THEN RAISE EXCEPTION 'wishlist insert refused'; END IF; \
                 RETURN NEW; \
             END $$"
        ))
        .await?;
    state
        .orm
        .execute_unprepared(&format!(
            "CREATE TRIGGER {name} BEFORE INSERT ON wishlist_items \
             FOR EACH ROW EXECUTE FUNCTION {name}()"
        ))
        .await?;
    Ok(())
}

async fn allow_wishlist_inserts(state: &AppState, name: &str) -> anyhow::Result<()> {
    state
        .orm
        .execute_unprepared(&format!("DROP TRIGGER IF EXISTS {name} ON wishlist_items"))
        .await?;
    state
        .orm
        .execute_unprepared(&format!("DROP FUNCTION IF EXISTS {name}()"))
        .await?;
    Ok(())
}

#[tokio::test]
async fn failed_move_keeps_item_in_cart_and_earlier_moves() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state, "user").await?;
    let sword = create_product(&state, "Sword", Decimal::new(1500, 2)).await?;
    let shield = create_product(&state, "Shield", Decimal::new(2000, 2)).await?;
    let helm = create_product(&state, "Helm", Decimal::new(1200, 2)).await?;

    // cart rows migrate in insertion order: sword, shield, helm
    for product_id in [sword.id, shield.id, shield.id, helm.id] {
        cart_service::add_or_increment(&state, &user, AddToCartRequest { product_id }).await?;
    }

    let trigger = format!("refuse_{}", Uuid::new_v4().simple());
    refuse_wishlist_inserts(&state, &trigger, shield.id).await?;
    let failed = wishlist_service::move_cart_to_wishlist(&state, &user).await;
    allow_wishlist_inserts(&state, &trigger).await?;
    assert!(failed.is_err());

    let wishlist = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    let wished: Vec<_> = wishlist.items.iter().map(|i| i.product.id).collect();
    assert_eq!(wished, vec![sword.id]);

    let cart = cart_service::view_cart(&state, &user).await?.data.expect("cart");
    let left: Vec<_> = cart.items.iter().map(|i| (i.product.id, i.quantity)).collect();
    assert_eq!(left, vec![(shield.id, 2), (helm.id, 1)]);

    let retry = wishlist_service::move_cart_to_wishlist(&state, &user)
        .await?
        .data
        .expect("moved");
    assert_eq!(retry.moved, 2);

    let cart = cart_service::view_cart(&state, &user).await?.data.expect("cart");
    assert!(cart.items.is_empty());
    let wishlist = wishlist_service::view_wishlist(&state, &user).await?.data.expect("wishlist");
    assert_eq!(wishlist.items.len(), 3);
    Ok(())
}
