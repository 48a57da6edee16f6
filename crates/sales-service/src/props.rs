//! Construction inputs of a service instance.

use serde::{Deserialize, Serialize};

/// Who a service acts for.
///
/// Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProps {
    /// Tenant the service is restricted to.
    #[serde(default)]
    pub business_id: Option<String>,
    /// Customer the service is restricted to, for customer-scoped entities.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Acting user recorded in audit fields.
    #[serde(default)]
    pub actor: Option<String>,
}

impl ServiceProps {
    /// Props for a business-level service.
    pub fn business(business_id: impl Into<String>) -> Self {
        Self {
            business_id: Some(business_id.into()),
            ..Self::default()
        }
    }

    /// Props for a customer-level service.
    pub fn customer(business_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            business_id: Some(business_id.into()),
            customer_id: Some(customer_id.into()),
            ..Self::default()
        }
    }

    /// Set the acting user.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Business id, if present and not blank.
    pub fn business_id(&self) -> Option<&str> {
        non_blank(self.business_id.as_deref())
    }

    /// Customer id, if present and not blank.
    pub fn customer_id(&self) -> Option<&str> {
        non_blank(self.customer_id.as_deref())
    }

    /// Actor, if present and not blank.
    pub fn actor(&self) -> Option<&str> {
        non_blank(self.actor.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_absent() {
        let props = ServiceProps {
            business_id: Some("  ".to_string()),
            customer_id: Some(String::new()),
            actor: None,
        };
        assert_eq!(props.business_id(), None);
        assert_eq!(props.customer_id(), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let props = ServiceProps::customer(" biz1 ", "cust1").with_actor("ops");
        assert_eq!(props.business_id(), Some("biz1"));
        assert_eq!(props.customer_id(), Some("cust1"));
        assert_eq!(props.actor(), Some("ops"));
    }
}
