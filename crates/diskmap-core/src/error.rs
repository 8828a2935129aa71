use thiserror::Error;

/// Result type alias for diskmap operations
pub type Result<T> = std::result::Result<T, DiskmapError>;

/// Errors that can occur while aggregating discovery reports
#[derive(Error, Debug)]
pub enum DiskmapError {
    /// Report failed validation - nothing was mutated
    #[error("invalid report: {reason}")]
    InvalidReport {
        /// What was wrong with the report
        reason: String,
    },

    /// A device carries no usable identity (no WWN, no device ID)
    #[error("invalid device {path}: {reason}")]
    InvalidDevice {
        /// Filesystem path of the offending device
        path: String,
        /// What was wrong with the device
        reason: String,
    },

    /// Report is older than the one currently held for the node
    #[error("stale report for node {node}: held {held}, offered {offered}")]
    StaleReport {
        /// Node the report was for
        node: String,
        /// `observed_at` of the report currently held
        held: chrono::DateTime<chrono::Utc>,
        /// `observed_at` of the rejected report
        offered: chrono::DateTime<chrono::Utc>,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiskmapError {
    /// Shorthand for [`DiskmapError::InvalidReport`]
    pub fn invalid_report(reason: impl Into<String>) -> Self {
        Self::InvalidReport {
            reason: reason.into(),
        }
    }

    /// Returns true if the error means the input should be skipped,
    /// not treated as a feed failure
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidReport { .. } | Self::InvalidDevice { .. } | Self::StaleReport { .. }
        )
    }
}
