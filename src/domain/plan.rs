//! Plan value object.

use serde::{Deserialize, Serialize};

/// Custom-field key the gateway carries the plan name under.
pub(crate) const PLAN_CUSTOM_FIELD: &str = "plan";

/// A name-only plan reference, carried as a custom field on the
/// transparent-redirect confirmation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_a_name() {
        assert_eq!(Plan::new("yearly"), Plan { name: "yearly".to_string() });
    }
}
