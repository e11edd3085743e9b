//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors (reserved)
/// - 3xxx: Merchant errors
/// - 4xxx: Kitchen errors
/// - 5xxx: Marketing errors
/// - 6xxx: Online ordering errors
/// - 7xxx: QR ordering errors
/// - 8xxx: Tip pool errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Merchant errors (3xxx)
    Merchant,
    /// Kitchen errors (4xxx)
    Kitchen,
    /// Marketing errors (5xxx)
    Marketing,
    /// Online ordering errors (6xxx)
    OnlineOrder,
    /// QR ordering errors (7xxx)
    QrOrdering,
    /// Tip pool errors (8xxx)
    TipPool,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Merchant,
            4000..5000 => Self::Kitchen,
            5000..6000 => Self::Marketing,
            6000..7000 => Self::OnlineOrder,
            7000..8000 => Self::QrOrdering,
            8000..9000 => Self::TipPool,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Merchant => "merchant",
            Self::Kitchen => "kitchen",
            Self::Marketing => "marketing",
            Self::OnlineOrder => "online_order",
            Self::QrOrdering => "qr_ordering",
            Self::TipPool => "tip_pool",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(11), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Merchant);
        assert_eq!(ErrorCategory::from_code(4101), ErrorCategory::Kitchen);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Marketing);
        assert_eq!(ErrorCategory::from_code(6201), ErrorCategory::OnlineOrder);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::QrOrdering);
        assert_eq!(ErrorCategory::from_code(8102), ErrorCategory::TipPool);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenInvalid.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::MerchantRequired.category(), ErrorCategory::Merchant);
        assert_eq!(
            ErrorCode::DeviceIdentifierExists.category(),
            ErrorCategory::Kitchen
        );
        assert_eq!(
            ErrorCode::TransactionIdExists.category(),
            ErrorCategory::OnlineOrder
        );
        assert_eq!(ErrorCode::EmployeeNotFound.category(), ErrorCategory::TipPool);
        assert_eq!(
            ErrorCode::RelationNotLoaded.category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::OnlineOrder).unwrap();
        assert_eq!(json, "\"online_order\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
