//! Error types for the allocator.

use thiserror::Error;

/// Errors raised while validating an allocation request.
///
/// Both kinds are caused by caller input and are never retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// A global parameter (`asset_cap` or `total_capital`) is out of range.
    #[error("{0}")]
    InvalidParameter(String),

    /// A specific asset has an unusable market cap or price.
    #[error("invalid asset {symbol}: {reason}")]
    InvalidAsset {
        /// Symbol of the offending asset.
        symbol: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl AllocationError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn invalid_asset(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAsset {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}
