use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{ProductDetail, ProductList, ProductStatusRequest, ProductStatusResult},
    entity::{
        products::{Column, Entity as Products},
        reviews::{Column as ReviewCol, Entity as Reviews},
        sea_orm_active_enums::ProductStatus,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = Condition::all().add(Column::Status.eq(ProductStatus::Listed));

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let items: Vec<_> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Product page: listed, in-stock products only, with reviews newest first.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDetail>> {
    let product = Products::find_by_id(id)
        .filter(Column::Status.eq(ProductStatus::Listed))
        .filter(Column::StockQuantity.gt(0))
        .one(&state.orm)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let reviews = Reviews::find()
        .filter(ReviewCol::ProductId.eq(product.id))
        .order_by_desc(ReviewCol::CreatedAt);
    let review_count = reviews.clone().count(&state.orm).await? as i64;
    let reviews = reviews
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Product",
        ProductDetail {
            product: product.into(),
            reviews,
            review_count,
        },
        None,
    ))
}

/// Lists or delists a batch of products.
pub async fn set_product_status(
    state: &AppState,
    user: &AuthUser,
    payload: ProductStatusRequest,
) -> AppResult<ApiResponse<ProductStatusResult>> {
    ensure_admin(user)?;
    if payload.product_ids.is_empty() {
        return Err(AppError::BadRequest("product_ids must not be empty".into()));
    }

    let result = Products::update_many()
        .col_expr(Column::Status, Expr::value(payload.status))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.is_in(payload.product_ids.clone()))
        .exec(&state.orm)
        .await?;

    audit::record(
        &state.orm,
        user.user_id,
        "product_status",
        "products",
        serde_json::json!({ "product_ids": payload.product_ids, "status": payload.status }),
    )
    .await;

    let message = match payload.status {
        ProductStatus::Listed => "Products listed",
        ProductStatus::Unlisted => "Products delisted",
    };

    Ok(ApiResponse::success(
        message,
        ProductStatusResult {
            status: payload.status,
            updated: result.rows_affected,
        },
        Some(Meta::none()),
    ))
}
