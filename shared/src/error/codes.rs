//! Unified error codes for the Zofa backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors (bread types, orders, coupons)
//! - 6xxx: Product errors (products, categories, uploads)
//! - 8xxx: User errors (users, admins, push tokens)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the mobile client can
/// switch on a number instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
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
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Bread type not found
    BreadTypeNotFound = 4101,
    /// Bread type name already exists
    BreadTypeExists = 4102,
    /// Coupon not found
    CouponNotFound = 4201,
    /// Coupon code already exists
    CouponCodeExists = 4202,
    /// Coupon percentage outside 0..=100
    CouponInvalidPercentage = 4203,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Invalid product price
    ProductInvalidPrice = 6002,
    /// Product barcode already exists
    ProductExists = 6003,
    /// Stock flag must be 0 or 1
    InvalidStockValue = 6004,
    /// Field cannot be edited through the generic update route
    FieldNotEditable = 6005,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists
    CategoryNameExists = 6103,
    /// File too large
    FileTooLarge = 6501,
    /// No file provided in upload
    NoFileProvided = 6504,
    /// Empty file
    EmptyFile = 6505,
    /// No filename provided
    NoFilename = 6506,
    /// Object storage write/delete failed
    FileStorageFailed = 6509,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// User phone number already registered
    UserExists = 8002,
    /// No push token registered for the phone number
    PushTokenNotFound = 8003,
    /// Admin not found
    AdminNotFound = 8101,
    /// Admin phone number already registered
    AdminExists = 8102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Push provider rejected or failed the request
    PushFailed = 9301,
    /// System busy (pool exhausted, retry later)
    SystemBusy = 9404,
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
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::BreadTypeNotFound => "Bread type not found",
            ErrorCode::BreadTypeExists => "Bread type already exists",
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponCodeExists => "Coupon code already exists",
            ErrorCode::CouponInvalidPercentage => "Coupon percentage must be between 0 and 100",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Invalid product price",
            ErrorCode::ProductExists => "Product already exists",
            ErrorCode::InvalidStockValue => "Stock must be 0 or 1",
            ErrorCode::FieldNotEditable => "Field cannot be updated",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category already exists",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::FileStorageFailed => "File storage failed",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserExists => "User already exists",
            ErrorCode::PushTokenNotFound => "FCM token not found for the given phone number",
            ErrorCode::AdminNotFound => "Admin not found",
            ErrorCode::AdminExists => "Admin already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PushFailed => "Failed to send notification",
            ErrorCode::SystemBusy => "System busy, please retry later",
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
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4101 => Ok(ErrorCode::BreadTypeNotFound),
            4102 => Ok(ErrorCode::BreadTypeExists),
            4201 => Ok(ErrorCode::CouponNotFound),
            4202 => Ok(ErrorCode::CouponCodeExists),
            4203 => Ok(ErrorCode::CouponInvalidPercentage),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductExists),
            6004 => Ok(ErrorCode::InvalidStockValue),
            6005 => Ok(ErrorCode::FieldNotEditable),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6103 => Ok(ErrorCode::CategoryNameExists),
            6501 => Ok(ErrorCode::FileTooLarge),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6506 => Ok(ErrorCode::NoFilename),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserExists),
            8003 => Ok(ErrorCode::PushTokenNotFound),
            8101 => Ok(ErrorCode::AdminNotFound),
            8102 => Ok(ErrorCode::AdminExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9301 => Ok(ErrorCode::PushFailed),
            9404 => Ok(ErrorCode::SystemBusy),

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

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidFormat,
        ErrorCode::RequiredField,
        ErrorCode::ValueOutOfRange,
        ErrorCode::OrderNotFound,
        ErrorCode::BreadTypeNotFound,
        ErrorCode::BreadTypeExists,
        ErrorCode::CouponNotFound,
        ErrorCode::CouponCodeExists,
        ErrorCode::CouponInvalidPercentage,
        ErrorCode::ProductNotFound,
        ErrorCode::ProductInvalidPrice,
        ErrorCode::ProductExists,
        ErrorCode::InvalidStockValue,
        ErrorCode::FieldNotEditable,
        ErrorCode::CategoryNotFound,
        ErrorCode::CategoryNameExists,
        ErrorCode::FileTooLarge,
        ErrorCode::NoFileProvided,
        ErrorCode::EmptyFile,
        ErrorCode::NoFilename,
        ErrorCode::FileStorageFailed,
        ErrorCode::UserNotFound,
        ErrorCode::UserExists,
        ErrorCode::PushTokenNotFound,
        ErrorCode::AdminNotFound,
        ErrorCode::AdminExists,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::NetworkError,
        ErrorCode::TimeoutError,
        ErrorCode::ConfigError,
        ErrorCode::PushFailed,
        ErrorCode::SystemBusy,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::CouponCodeExists.code(), 4202);
        assert_eq!(ErrorCode::ProductExists.code(), 6003);
        assert_eq!(ErrorCode::CategoryNameExists.code(), 6103);
        assert_eq!(ErrorCode::AdminExists.code(), 8102);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_covers_every_code() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(1001), Err(InvalidErrorCode(1001)));
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ProductNotFound).unwrap();
        assert_eq!(json, "6001");

        let code: ErrorCode = serde_json::from_str("4201").unwrap();
        assert_eq!(code, ErrorCode::CouponNotFound);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::InvalidStockValue), "6004");
        assert_eq!(
            format!("{}", InvalidErrorCode(77)),
            "invalid error code: 77"
        );
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::InvalidStockValue.message(), "Stock must be 0 or 1");
        assert_eq!(
            ErrorCode::PushTokenNotFound.message(),
            "FCM token not found for the given phone number"
        );
        assert!(ALL.iter().all(|c| !c.message().is_empty()));
    }
}
