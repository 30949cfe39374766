//! Error types for resampling operations

/// Result type for resampling operations
pub type Result<T> = std::result::Result<T, ResampleError>;

/// Errors that can occur while building or running a resampler
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResampleError {
    #[error("Invalid upsampling factor: {0}. Must be positive")]
    InvalidUpRate(usize),

    #[error("Invalid downsampling factor: {0}. Must be positive")]
    InvalidDownRate(usize),

    #[error("Filter must contain at least one coefficient")]
    EmptyFilter,

    #[error("Output buffer too small: need {needed} samples, have {available}")]
    InsufficientOutput { needed: usize, available: usize },

    #[error("Bank needs 1 or {channels} filters, got {filters}")]
    FilterCountMismatch { channels: usize, filters: usize },

    #[error("Bank must have at least one channel")]
    NoChannels,

    #[error("Expected {expected} input channels, got {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}

impl ResampleError {
    /// True for errors raised while constructing a resampler or bank.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ResampleError::InvalidUpRate(_)
                | ResampleError::InvalidDownRate(_)
                | ResampleError::EmptyFilter
                | ResampleError::FilterCountMismatch { .. }
                | ResampleError::NoChannels
        )
    }

    /// True when a caller-provided output buffer was too small.
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, ResampleError::InsufficientOutput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(ResampleError::InvalidUpRate(0).is_configuration_error());
        assert!(ResampleError::EmptyFilter.is_configuration_error());
        assert!(!ResampleError::EmptyFilter.is_capacity_error());

        let err = ResampleError::InsufficientOutput { needed: 9, available: 1 };
        assert!(err.is_capacity_error());
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_error_display() {
        let err = ResampleError::InsufficientOutput { needed: 15, available: 4 };
        assert_eq!(
            err.to_string(),
            "Output buffer too small: need 15 samples, have 4"
        );
        assert_eq!(
            ResampleError::InvalidDownRate(0).to_string(),
            "Invalid downsampling factor: 0. Must be positive"
        );
    }
}
