use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, AdjustQuantityRequest, CartItemAdjustment, CartView, ClearCartResult, LineItemDto, QuantityDelta},
        products::{ProductDetail, ProductList, ProductStatusRequest, ProductStatusResult},
        reviews::{ReviewDeletion, ReviewRequest},
        wishlist::{AddToWishlistRequest, MoveToWishlistResult, WishlistAddResult, WishlistView},
    },
    entity::sea_orm_active_enums::{ProductCategory, ProductStatus},
    error::FieldError,
    models::{CartItem, Product, Review, Wishlist, WishlistItem},
    response::{ApiResponse, Meta},
    routes::{admin, cart, health, params, products, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::view_cart,
        cart::add_to_cart,
        cart::adjust_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        cart::move_to_wishlist,
        wishlist::view_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        products::list_products,
        products::get_product,
        products::submit_review,
        products::delete_review,
        admin::set_product_status
    ),
    components(
        schemas(
            Product,
            ProductCategory,
            ProductStatus,
            CartItem,
            Wishlist,
            WishlistItem,
            Review,
            FieldError,
            AddToCartRequest,
            AdjustQuantityRequest,
            QuantityDelta,
            LineItemDto,
            CartView,
            CartItemAdjustment,
            ClearCartResult,
            AddToWishlistRequest,
            WishlistView,
            WishlistAddResult,
            MoveToWishlistResult,
            ReviewRequest,
            ReviewDeletion,
            ProductList,
            ProductDetail,
            ProductStatusRequest,
            ProductStatusResult,
            params::ProductSortBy,
            params::SortOrder,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<WishlistView>,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Admin", description = "Catalog listing actions"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
