use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::sea_orm_active_enums::ProductStatus,
    models::{Product, Review},
};

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: Vec<Review>,
    pub review_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductStatusRequest {
    pub product_ids: Vec<Uuid>,
    pub status: ProductStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductStatusResult {
    pub status: ProductStatus,
    pub updated: u64,
}
