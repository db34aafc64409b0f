mod common;

use axum_storefront::{
    dto::{products::ProductStatusRequest, reviews::ReviewRequest},
    entity::sea_orm_active_enums::ProductStatus,
    error::AppError,
    services::{
        product_service,
        review_service::{self, DeleteReviewOutcome, NOT_AUTHOR_MESSAGE},
    },
};
use rust_decimal::Decimal;

use common::{create_product, create_user, setup_state};

fn review(title: &str, score: i32) -> ReviewRequest {
    ReviewRequest {
        title: title.to_string(),
        content: "I killed a rock with this once.".to_string(),
        score,
    }
}

#[tokio::test]
async fn only_the_author_can_delete_a_review() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let author = create_user(&state, "user").await?;
    let other = create_user(&state, "user").await?;
    let product = create_product(&state, "Big Sword", Decimal::new(250, 2)).await?;

    let created = review_service::submit_review(&state, &author, product.id, review("Sharp", 5))
        .await?
        .data
        .expect("review");

    let rejected = review_service::delete_review(&state, &other, product.id, created.id).await?;
    match rejected {
        DeleteReviewOutcome::NotAuthor(body) => {
            assert_eq!(body.message, NOT_AUTHOR_MESSAGE);
            assert!(!body.data.expect("deletion").deleted);
        }
        DeleteReviewOutcome::Deleted(_) => panic!("non-author deleted a review"),
    }

    let page = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product page");
    assert_eq!(page.review_count, 1);

    let deleted = review_service::delete_review(&state, &author, product.id, created.id).await?;
    assert!(matches!(deleted, DeleteReviewOutcome::Deleted(_)));

    let gone = review_service::delete_review(&state, &author, product.id, created.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn invalid_review_writes_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let author = create_user(&state, "user").await?;
    let product = create_product(&state, "Spear", Decimal::new(1200, 2)).await?;

    let result = review_service::submit_review(&state, &author, product.id, review("", 9)).await;
    match result {
        Err(AppError::Validation(fields)) => assert_eq!(fields.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }

    let page = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product page");
    assert_eq!(page.review_count, 0);
    Ok(())
}

#[tokio::test]
async fn product_page_lists_newest_reviews_first() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let author = create_user(&state, "user").await?;
    let product = create_product(&state, "Hammer", Decimal::new(1800, 2)).await?;

    for title in ["older", "newer"] {
        review_service::submit_review(&state, &author, product.id, review(title, 4)).await?;
    }

    let page = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("product page");
    let titles: Vec<_> = page.reviews.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["newer", "older"]);
    assert_eq!(page.review_count, 2);
    Ok(())
}

#[tokio::test]
async fn delisted_products_leave_the_catalog() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let admin = create_user(&state, "admin").await?;
    let user = create_user(&state, "user").await?;
    let product = create_product(&state, "Cursed Amulet", Decimal::new(6600, 2)).await?;

    let request = || ProductStatusRequest {
        product_ids: vec![product.id],
        status: ProductStatus::Unlisted,
    };

    let forbidden = product_service::set_product_status(&state, &user, request()).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let result = product_service::set_product_status(&state, &admin, request())
        .await?
        .data
        .expect("status result");
    assert_eq!(result.updated, 1);

    let page = product_service::get_product(&state, product.id).await;
    assert!(matches!(page, Err(AppError::NotFound)));
    Ok(())
}
