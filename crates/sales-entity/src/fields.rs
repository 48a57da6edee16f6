//! Field names shared by every sales collection.

/// Tenant scope field.
pub const BUSINESS_ID: &str = "business_id";
/// Customer scope field.
pub const CUSTOMER_ID: &str = "customer_id";
/// Soft-delete marker.
pub const IS_DELETED: &str = "is_deleted";
/// Creation timestamp.
pub const CREATED_AT: &str = "created_at";
/// Creating actor.
pub const CREATED_BY: &str = "created_by";
/// Last update timestamp.
pub const UPDATED_AT: &str = "updated_at";
/// Last updating actor.
pub const UPDATED_BY: &str = "updated_by";
/// Database-native document identifier.
pub const INTERNAL_ID: &str = "_id";

/// Audit fields managed by the system, never accepted from callers.
pub const AUDIT_FIELDS: [&str; 4] = [CREATED_AT, CREATED_BY, UPDATED_AT, UPDATED_BY];

/// Lower bound of a region pincode range.
pub const REGION_PINCODE_FROM: &str = "sales_region_pincodes.pincode_from";
/// Upper bound of a region pincode range.
pub const REGION_PINCODE_TO: &str = "sales_region_pincodes.pincode_to";
