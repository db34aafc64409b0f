use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::{ReviewDeletion, ReviewRequest},
    entity::{
        products::Entity as Products,
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Review,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const NOT_AUTHOR_MESSAGE: &str = "You can only delete your own reviews!";

/// Result of a delete request. A non-author is turned away without an error.
#[derive(Debug)]
pub enum DeleteReviewOutcome {
    Deleted(ApiResponse<ReviewDeletion>),
    NotAuthor(ApiResponse<ReviewDeletion>),
}

pub async fn submit_review(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: ReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let review = payload.validate().map_err(AppError::Validation)?;

    let product = Products::find_by_id(product_id).one(&state.orm).await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let created = ReviewActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        user_id: Set(user.user_id),
        title: Set(review.title),
        content: Set(review.content),
        score: Set(review.score),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user.user_id,
        "review_create",
        "reviews",
        serde_json::json!({ "product_id": product_id, "review_id": created.id }),
    )
    .await;

    // no moderation queue; the review is visible immediately
    Ok(ApiResponse::success(
        "Review submitted and awaiting approval",
        created.into(),
        Some(Meta::none()),
    ))
}

pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    review_id: Uuid,
) -> AppResult<DeleteReviewOutcome> {
    let result = Reviews::delete_many()
        .filter(
            Condition::all()
                .add(ReviewCol::Id.eq(review_id))
                .add(ReviewCol::ProductId.eq(product_id))
                .add(ReviewCol::UserId.eq(user.user_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        let existing = Reviews::find()
            .filter(
                Condition::all()
                    .add(ReviewCol::Id.eq(review_id))
                    .add(ReviewCol::ProductId.eq(product_id)),
            )
            .one(&state.orm)
            .await?;
        if existing.is_none() {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %user.user_id, review_id = %review_id, "review delete rejected");
        return Ok(DeleteReviewOutcome::NotAuthor(ApiResponse::success(
            NOT_AUTHOR_MESSAGE,
            ReviewDeletion {
                review_id,
                deleted: false,
            },
            Some(Meta::none()),
        )));
    }

    audit::record(
        &state.orm,
        user.user_id,
        "review_delete",
        "reviews",
        serde_json::json!({ "product_id": product_id, "review_id": review_id }),
    )
    .await;

    Ok(DeleteReviewOutcome::Deleted(ApiResponse::success(
        "Review deleted!",
        ReviewDeletion {
            review_id,
            deleted: true,
        },
        Some(Meta::none()),
    )))
}
