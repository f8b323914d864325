//! Customer identity
//!
//! Authentication happens upstream. The storefront only consumes an
//! already-resolved identity, forwarded as request headers:
//!
//! | Header | Required | Meaning |
//! |--------|----------|---------|
//! | `x-customer-id` | yes | Stable customer id |
//! | `x-customer-name` | no | Display name |
//! | `x-customer-phone` | no | Contact phone |
//! | `x-customer-role` | no | `user` (default) or `admin` |

mod extractor;

pub use extractor::StaffAccess;

use serde::{Deserialize, Serialize};

pub const HEADER_CUSTOMER_ID: &str = "x-customer-id";
pub const HEADER_CUSTOMER_NAME: &str = "x-customer-name";
pub const HEADER_CUSTOMER_PHONE: &str = "x-customer-phone";
pub const HEADER_CUSTOMER_ROLE: &str = "x-customer-role";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Resolved customer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub customer_id: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl CustomerIdentity {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            display_name: None,
            phone: None,
            role: Role::User,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Admin
    }
}
