use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::cart::LineItemDto,
    models::{Wishlist, WishlistItem},
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddToWishlistRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistView {
    /// `None` until the owner first saves something.
    pub wishlist: Option<Wishlist>,
    pub items: Vec<LineItemDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistAddResult {
    pub item: WishlistItem,
    pub created: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MoveToWishlistResult {
    pub wishlist_id: Uuid,
    pub moved: u64,
}
