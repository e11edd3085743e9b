//! Unified error codes for the merchant backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors (reserved)
//! - 3xxx: Merchant (tenant) errors
//! - 4xxx: Kitchen errors
//! - 5xxx: Marketing errors
//! - 6xxx: Online ordering errors
//! - 7xxx: QR ordering errors
//! - 8xxx: Tip pool / staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Record id is not a positive integer
    InvalidId = 9,
    /// Page or limit outside the accepted bounds
    InvalidPagination = 10,
    /// Record has already been logically deleted
    AlreadyDeleted = 11,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Merchant ====================
    /// Caller is not associated with a merchant
    MerchantRequired = 3001,
    /// Merchant not found
    MerchantNotFound = 3002,

    // ==================== 4xxx: Kitchen ====================
    /// Kitchen station not found
    KitchenStationNotFound = 4001,
    /// Kitchen station name already exists
    KitchenStationNameExists = 4002,
    /// Kitchen device not found
    KitchenDeviceNotFound = 4101,
    /// Device identifier already exists
    DeviceIdentifierExists = 4102,

    // ==================== 5xxx: Marketing ====================
    /// Marketing automation not found
    AutomationNotFound = 5001,
    /// Marketing automation name already exists
    AutomationNameExists = 5002,
    /// Automation action not found
    AutomationActionNotFound = 5101,

    // ==================== 6xxx: Online ordering ====================
    /// Online order not found
    OnlineOrderNotFound = 6001,
    /// Order number already exists
    OrderNumberExists = 6002,
    /// Delivery info not found
    DeliveryInfoNotFound = 6101,
    /// Order already has delivery info
    DeliveryInfoExists = 6102,
    /// Payment info not found
    PaymentInfoNotFound = 6201,
    /// Transaction id already exists
    TransactionIdExists = 6202,

    // ==================== 7xxx: QR ordering ====================
    /// QR code not found
    QrCodeNotFound = 7001,
    /// QR code already exists
    QrCodeExists = 7002,

    // ==================== 8xxx: Tip pools ====================
    /// Tip pool not found
    TipPoolNotFound = 8001,
    /// Tip pool name already exists
    TipPoolNameExists = 8002,
    /// Tip pool member not found
    TipPoolMemberNotFound = 8101,
    /// Employee already belongs to the tip pool
    TipPoolMemberExists = 8102,
    /// Employee not found
    EmployeeNotFound = 8201,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Related record was not loaded before formatting
    RelationNotLoaded = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidId => "Id must be a positive integer",
            ErrorCode::InvalidPagination => "Invalid pagination parameters",
            ErrorCode::AlreadyDeleted => "Resource already deleted",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Merchant
            ErrorCode::MerchantRequired => "User is not associated with a merchant",
            ErrorCode::MerchantNotFound => "Merchant not found",

            // Kitchen
            ErrorCode::KitchenStationNotFound => "Kitchen station not found",
            ErrorCode::KitchenStationNameExists => "Kitchen station name already exists",
            ErrorCode::KitchenDeviceNotFound => "Kitchen device not found",
            ErrorCode::DeviceIdentifierExists => "Device identifier already exists",

            // Marketing
            ErrorCode::AutomationNotFound => "Marketing automation not found",
            ErrorCode::AutomationNameExists => "Marketing automation name already exists",
            ErrorCode::AutomationActionNotFound => "Automation action not found",

            // Online ordering
            ErrorCode::OnlineOrderNotFound => "Online order not found",
            ErrorCode::OrderNumberExists => "Order number already exists",
            ErrorCode::DeliveryInfoNotFound => "Delivery info not found",
            ErrorCode::DeliveryInfoExists => "Order already has delivery info",
            ErrorCode::PaymentInfoNotFound => "Payment info not found",
            ErrorCode::TransactionIdExists => "Transaction id already exists",

            // QR ordering
            ErrorCode::QrCodeNotFound => "QR code not found",
            ErrorCode::QrCodeExists => "QR code already exists",

            // Tip pools
            ErrorCode::TipPoolNotFound => "Tip pool not found",
            ErrorCode::TipPoolNameExists => "Tip pool name already exists",
            ErrorCode::TipPoolMemberNotFound => "Tip pool member not found",
            ErrorCode::TipPoolMemberExists => "Employee is already a member of this tip pool",
            ErrorCode::EmployeeNotFound => "Employee not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::RelationNotLoaded => "Related record was not loaded",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidId),
            10 => Ok(ErrorCode::InvalidPagination),
            11 => Ok(ErrorCode::AlreadyDeleted),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Merchant
            3001 => Ok(ErrorCode::MerchantRequired),
            3002 => Ok(ErrorCode::MerchantNotFound),

            // Kitchen
            4001 => Ok(ErrorCode::KitchenStationNotFound),
            4002 => Ok(ErrorCode::KitchenStationNameExists),
            4101 => Ok(ErrorCode::KitchenDeviceNotFound),
            4102 => Ok(ErrorCode::DeviceIdentifierExists),

            // Marketing
            5001 => Ok(ErrorCode::AutomationNotFound),
            5002 => Ok(ErrorCode::AutomationNameExists),
            5101 => Ok(ErrorCode::AutomationActionNotFound),

            // Online ordering
            6001 => Ok(ErrorCode::OnlineOrderNotFound),
            6002 => Ok(ErrorCode::OrderNumberExists),
            6101 => Ok(ErrorCode::DeliveryInfoNotFound),
            6102 => Ok(ErrorCode::DeliveryInfoExists),
            6201 => Ok(ErrorCode::PaymentInfoNotFound),
            6202 => Ok(ErrorCode::TransactionIdExists),

            // QR ordering
            7001 => Ok(ErrorCode::QrCodeNotFound),
            7002 => Ok(ErrorCode::QrCodeExists),

            // Tip pools
            8001 => Ok(ErrorCode::TipPoolNotFound),
            8002 => Ok(ErrorCode::TipPoolNameExists),
            8101 => Ok(ErrorCode::TipPoolMemberNotFound),
            8102 => Ok(ErrorCode::TipPoolMemberExists),
            8201 => Ok(ErrorCode::EmployeeNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9006 => Ok(ErrorCode::RelationNotLoaded),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyDeleted.code(), 11);
        assert_eq!(ErrorCode::MerchantRequired.code(), 3001);
        assert_eq!(ErrorCode::DeviceIdentifierExists.code(), 4102);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_error_code_try_from() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(6202), Ok(ErrorCode::TransactionIdExists));
        assert_eq!(ErrorCode::try_from(8102), Ok(ErrorCode::TipPoolMemberExists));
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        // Unassigned slots do not decode
        for unassigned in [1, 7, 2001, 9005] {
            assert_eq!(
                ErrorCode::try_from(unassigned),
                Err(InvalidErrorCode(unassigned))
            );
        }
    }

    #[test]
    fn test_error_code_serialize() {
        let code = ErrorCode::KitchenDeviceNotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "4101");

        let parsed: ErrorCode = serde_json::from_str("4101").unwrap();
        assert_eq!(parsed, ErrorCode::KitchenDeviceNotFound);
    }

    #[test]
    fn test_error_code_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("4999");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::QrCodeExists.to_string(), "7002");
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::AlreadyDeleted.is_success());
    }
}
