pub mod audit_logs;
pub mod cart_items;
pub mod products;
pub mod reviews;
pub mod sea_orm_active_enums;
pub mod users;
pub mod wishlist_items;
pub mod wishlists;
