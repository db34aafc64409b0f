pub mod cart_service;
pub mod line_items;
pub mod product_service;
pub mod review_service;
pub mod wishlist_service;
