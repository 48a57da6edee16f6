//! Descriptors for every sales entity.

use crate::descriptor::{CustomerScope, EntityDescriptor};

/// "About us" pages.
pub const ABOUT_US: EntityDescriptor =
    EntityDescriptor::new("aboutus", "sales_aboutus", "aboutus_id", "abtus");

/// Storefront banners.
pub const BANNER: EntityDescriptor =
    EntityDescriptor::new("banner", "sales_banner", "banner_id", "bnr")
        .with_name_field("banner_name");

/// Blog posts.
pub const BLOG: EntityDescriptor =
    EntityDescriptor::new("blog", "sales_blog", "blog_id", "blog").with_name_field("blog_name");

/// Product brands.
pub const BRAND: EntityDescriptor =
    EntityDescriptor::new("brand", "sales_brands", "brand_id", "brnd")
        .with_name_field("brand_name");

/// Callback requests.
pub const CALLBACK: EntityDescriptor =
    EntityDescriptor::new("callback", "sales_callbacks", "callback_id", "cb");

/// Shopping cart lines, always owned by a customer.
pub const CART: EntityDescriptor = EntityDescriptor::new("cart", "sales_cart", "cart_id", "crt")
    .with_customer_scope(CustomerScope::Required);

/// Catalogues.
pub const CATALOGUE: EntityDescriptor =
    EntityDescriptor::new("catalogue", "sales_catalogue", "catalogue_id", "ctlg")
        .with_name_field("catalogue_name");

/// Product categories.
pub const CATEGORY: EntityDescriptor =
    EntityDescriptor::new("category", "sales_category", "category_id", "cat")
        .with_name_field("category_name");

/// Customers of a business.
pub const CUSTOMER: EntityDescriptor =
    EntityDescriptor::new("customer", "sales_customer", "customer_id", "cust");

/// A customer's own cart, reached through the customer-facing services.
pub const CUSTOMER_CART: EntityDescriptor =
    EntityDescriptor::new("customer_cart", "sales_customer_cart", "cart_id", "crt")
        .with_customer_scope(CustomerScope::Required);

/// Customer orders as seen by the business.
pub const CUSTOMER_ORDER: EntityDescriptor = EntityDescriptor::new(
    "customer_order",
    "sales_customer_order",
    "customer_order_id",
    "c_order",
)
.with_name_field("customer_order_name");

/// Customer orders as seen by the ordering customer.
pub const CUSTOMER_OWN_ORDER: EntityDescriptor = EntityDescriptor::new(
    "customer_own_order",
    "sales_customer_order",
    "customer_order_id",
    "c_order",
)
.with_name_field("customer_order_name")
.with_customer_scope(CustomerScope::Required);

/// Reviews written by a customer.
pub const CUSTOMER_REVIEW: EntityDescriptor =
    EntityDescriptor::new("customer_review", "sales_review", "review_id", "rev")
        .with_customer_scope(CustomerScope::Optional);

/// Customer classifications.
pub const CUSTOMER_TYPE: EntityDescriptor = EntityDescriptor::new(
    "customer_type",
    "sales_customer_type",
    "customer_type_id",
    "ctyp",
)
.with_name_field("customer_type_name");

/// A customer's wishlist entries.
pub const CUSTOMER_WISHLIST: EntityDescriptor = EntityDescriptor::new(
    "customer_wishlist",
    "sales_customer_wishlist",
    "wishlist_id",
    "wish",
)
.with_customer_scope(CustomerScope::Optional);

/// Dealers.
pub const DEALER: EntityDescriptor =
    EntityDescriptor::new("dealer", "sales_dealer", "dealer_id", "dlr")
        .with_name_field("dealer_name");

/// Discounts.
pub const DISCOUNT: EntityDescriptor =
    EntityDescriptor::new("discount", "sales_discounts", "discount_id", "disc")
        .with_name_field("discount_name");

/// Media assets.
pub const MEDIA: EntityDescriptor =
    EntityDescriptor::new("media", "sales_media", "media_id", "media");

/// Storefront navigation entries.
pub const NAVIGATION: EntityDescriptor =
    EntityDescriptor::new("navigation", "sales_navigation", "navigation_id", "nav")
        .with_name_field("navigation_name");

/// Payments.
pub const PAYMENT: EntityDescriptor =
    EntityDescriptor::new("payment", "sales_payment", "payment_id", "pay")
        .with_name_field("payment_name");

/// Store policies (shipping, returns, ...).
pub const POLICY: EntityDescriptor =
    EntityDescriptor::new("policy", "sales_policies", "policy_id", "pol")
        .with_name_field("policy_name");

/// Preferences.
pub const PREFERENCE: EntityDescriptor =
    EntityDescriptor::new("preference", "sales_preference", "preference_id", "pref")
        .with_name_field("preference_name");

/// Products.
pub const PRODUCT: EntityDescriptor =
    EntityDescriptor::new("product", "sales_products", "product_id", "prod")
        .with_name_field("product_name");

/// Sales regions with pincode ranges.
pub const REGION: EntityDescriptor =
    EntityDescriptor::new("region", "sales_region", "sales_region_id", "rgn")
        .with_name_field("sales_region_name");

/// Product reviews as seen by the business.
pub const REVIEW: EntityDescriptor =
    EntityDescriptor::new("review", "sales_review", "review_id", "rev");

/// Testimonials.
pub const TESTIMONIAL: EntityDescriptor =
    EntityDescriptor::new("testimonial", "sales_testimonial", "testimonial_id", "tstm")
        .with_name_field("testimonial_name");

/// Wishlist entries as seen by the business.
pub const WISHLIST: EntityDescriptor =
    EntityDescriptor::new("wishlist", "sales_wishlist", "wishlist_id", "wish");

/// Businesses (tenants), owned by the platform rather than any tenant.
pub const PLATFORM_BUSINESS: EntityDescriptor =
    EntityDescriptor::new("business", "platform_businesses", "business_id", "biz").unscoped();

/// Every sales entity, in name order.
pub const ALL: &[EntityDescriptor] = &[
    ABOUT_US,
    BANNER,
    BLOG,
    BRAND,
    CALLBACK,
    CART,
    CATALOGUE,
    CATEGORY,
    CUSTOMER,
    CUSTOMER_CART,
    CUSTOMER_ORDER,
    CUSTOMER_OWN_ORDER,
    CUSTOMER_REVIEW,
    CUSTOMER_TYPE,
    CUSTOMER_WISHLIST,
    DEALER,
    DISCOUNT,
    MEDIA,
    NAVIGATION,
    PAYMENT,
    POLICY,
    PREFERENCE,
    PRODUCT,
    REGION,
    REVIEW,
    TESTIMONIAL,
    WISHLIST,
];

/// Look up a sales entity by name.
pub fn by_name(name: &str) -> Option<&'static EntityDescriptor> {
    ALL.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = ALL.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("brand").map(|d| d.id_prefix), Some("brnd"));
        assert_eq!(by_name("customer_order").map(|d| d.id_prefix), Some("c_order"));
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn test_own_orders_share_collection() {
        assert_eq!(CUSTOMER_OWN_ORDER.collection, CUSTOMER_ORDER.collection);
        assert_eq!(CUSTOMER_OWN_ORDER.customer_scope, CustomerScope::Required);
        assert_eq!(CUSTOMER_ORDER.customer_scope, CustomerScope::None);
    }

    #[test]
    fn test_all_sales_entities_are_tenant_scoped() {
        assert!(ALL.iter().all(|d| d.business_scoped));
        assert!(!PLATFORM_BUSINESS.business_scoped);
    }
}
