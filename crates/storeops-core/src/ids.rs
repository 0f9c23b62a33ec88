//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different code types,
//! e.g., passing a ProductCode where an EmployeeId is expected. All codes
//! in this system are externally assigned (barcodes, staff codes, unit
//! codes), so there is no generator here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define all ID types
define_id!(ProductCode);
define_id!(InventoryCode);
define_id!(UnitCode);
define_id!(EmployeeId);
define_id!(SaleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let code = ProductCode::new("7891000100103");
        assert_eq!(code.as_str(), "7891000100103");
    }

    #[test]
    fn test_id_from_str() {
        let code: UnitCode = "100".into();
        assert_eq!(code.as_str(), "100");
    }

    #[test]
    fn test_id_display() {
        let id = EmployeeId::new("1000");
        assert_eq!(format!("{}", id), "1000");
    }

    #[test]
    fn test_id_equality_and_ordering() {
        let a = ProductCode::new("1");
        let b = ProductCode::new("1");
        let c = ProductCode::new("2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }
}
