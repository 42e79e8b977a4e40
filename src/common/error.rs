use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // QR builder
    #[error("Data exceeds the capacity of the chosen version and error correction level")]
    CapacityExceeded,
    #[error("Scratch buffer could not be allocated")]
    AllocationFailure,
    #[error("Bit stream capacity overflow")]
    CapacityOverflow,
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Invalid masking pattern")]
    InvalidMaskPattern,

    // Renderer
    #[error("Canvas is smaller than the symbol")]
    CanvasTooSmall,
    #[error("Canvas exceeds the maximum renderable size")]
    CanvasTooLarge,
}

impl From<std::collections::TryReserveError> for QRError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::AllocationFailure
    }
}

pub type QRResult<T> = Result<T, QRError>;
