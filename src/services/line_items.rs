//! Ordering and totals for cart and wishlist views.
//!
//! Rows must be handed in insertion order; the sort is stable, so items with
//! equal line totals keep that order.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{dto::cart::LineItemDto, models::Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Cart,
    Wishlist,
}

#[derive(Debug, Clone)]
pub struct LineItemRow {
    pub item_id: Uuid,
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub items: Vec<LineItemDto>,
    /// Sum of every line total. Only carried for carts.
    pub total: Option<Decimal>,
}

pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

pub fn aggregate(kind: CollectionKind, rows: Vec<LineItemRow>) -> Aggregate {
    let mut items: Vec<LineItemDto> = rows
        .into_iter()
        .map(|row| {
            // wishlist membership counts as a single unit
            let quantity = match kind {
                CollectionKind::Cart => row.quantity,
                CollectionKind::Wishlist => 1,
            };
            LineItemDto {
                item_id: row.item_id,
                line_total: line_total(row.product.price, quantity),
                product: row.product,
                quantity,
            }
        })
        .collect();

    items.sort_by(|a, b| b.line_total.cmp(&a.line_total));

    let total = match kind {
        CollectionKind::Cart => Some(items.iter().map(|item| item.line_total).sum()),
        CollectionKind::Wishlist => None,
    };

    Aggregate { items, total }
}
