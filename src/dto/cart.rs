use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuantityDelta {
    Increment,
    Decrement,
}

pub const MAX_QUANTITY: i32 = i32::MAX;
pub const QUANTITY_LIMIT_MESSAGE: &str = "quantity limit reached";

impl QuantityDelta {
    /// Quantity after applying the delta, or `None` when an increment would
    /// pass `MAX_QUANTITY`. Never goes below zero; zero means the item must be
    /// deleted.
    pub fn apply(self, current: i32) -> Option<i32> {
        match self {
            QuantityDelta::Increment if current >= MAX_QUANTITY => None,
            QuantityDelta::Increment => Some(current + 1),
            QuantityDelta::Decrement => Some((current - 1).max(0)),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustQuantityRequest {
    pub delta: QuantityDelta,
}

/// One row of an ordered collection view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineItemDto {
    pub item_id: Uuid,
    pub product: Product,
    pub quantity: i32,
    #[schema(value_type = String, example = "10.00")]
    pub line_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<LineItemDto>,
    #[schema(value_type = String, example = "60.00")]
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemAdjustment {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub removed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearCartResult {
    pub removed: u64,
}
