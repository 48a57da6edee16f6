//! Named constructors for every catalog entity.

use sales_core::result::AppResult;
use sales_entity::catalog;

use super::service::EntityService;
use crate::context::ServiceContext;
use crate::props::ServiceProps;

/// Define `EntityService::<name>(ctx, props)` for catalog descriptors.
macro_rules! define_constructors {
    ($( $(#[$meta:meta])* $name:ident => $descriptor:path; )*) => {
        impl EntityService {
            $(
                $(#[$meta])*
                pub async fn $name(ctx: &ServiceContext, props: ServiceProps) -> AppResult<Self> {
                    Self::open($descriptor, ctx, props).await
                }
            )*
        }
    };
}

define_constructors! {
    /// "About us" pages of a business.
    about_us => catalog::ABOUT_US;
    /// Storefront banners.
    banners => catalog::BANNER;
    /// Blog posts.
    blogs => catalog::BLOG;
    /// Product brands.
    brands => catalog::BRAND;
    /// Callback requests.
    callbacks => catalog::CALLBACK;
    /// Cart lines of one customer.
    carts => catalog::CART;
    /// Catalogues.
    catalogues => catalog::CATALOGUE;
    /// Product categories.
    categories => catalog::CATEGORY;
    /// Customers.
    customers => catalog::CUSTOMER;
    /// A customer's own cart.
    customer_carts => catalog::CUSTOMER_CART;
    /// Orders across all customers.
    customer_orders => catalog::CUSTOMER_ORDER;
    /// Orders of one customer.
    customer_own_orders => catalog::CUSTOMER_OWN_ORDER;
    /// Reviews, restricted to a customer when one is given.
    customer_reviews => catalog::CUSTOMER_REVIEW;
    /// Customer classifications.
    customer_types => catalog::CUSTOMER_TYPE;
    /// Wishlist entries, restricted to a customer when one is given.
    customer_wishlists => catalog::CUSTOMER_WISHLIST;
    /// Dealers.
    dealers => catalog::DEALER;
    /// Discounts.
    discounts => catalog::DISCOUNT;
    /// Media assets.
    media => catalog::MEDIA;
    /// Navigation entries.
    navigation => catalog::NAVIGATION;
    /// Payments.
    payments => catalog::PAYMENT;
    /// Store policies.
    policies => catalog::POLICY;
    /// Preferences.
    preferences => catalog::PREFERENCE;
    /// Products.
    products => catalog::PRODUCT;
    /// Sales regions.
    regions => catalog::REGION;
    /// Product reviews.
    reviews => catalog::REVIEW;
    /// Testimonials.
    testimonials => catalog::TESTIMONIAL;
    /// Wishlist entries.
    wishlists => catalog::WISHLIST;
}
