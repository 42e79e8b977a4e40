//! # qrlite
//!
//! A small QR Code (Model 2) encoder. It turns a short text or byte payload into a
//! square grid of dark and light modules for a fixed version and error correction
//! level, with Reed-Solomon error correction and mask optimisation.
//!
//! ## Features
//!
//! - **Single mode encoding**: numeric, alphanumeric or byte, picked from the payload
//! - **Reed-Solomon error correction**: levels L, M, Q and H with block interleaving
//! - **Mask optimisation**: all 8 masks scored with the 4 penalty rules
//! - **Packed output**: row-major bit grid queried through [`QR::get_module`]
//!
//! ## Quick Start
//!
//! ```rust
//! use qrlite::{ECLevel, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"https://example.com/pay?id=42")
//!     .version(Version::new(15)?)  // if not provided, defaults to version 15
//!     .ec_level(ECLevel::L)        // if not provided, defaults to ECLevel::L
//!     .build()?;
//!
//! assert_eq!(qr.width(), 77);
//! assert!(qr.get_module(0, 0));        // finder corner
//! assert!(!qr.get_module(77, 0));      // outside the symbol reads as light
//!
//! let img = qr.render_canvas(240)?;    // 3 px per module, centred
//! # let _ = img;
//! # Ok(())
//! # }
//! ```
//!
//! ## Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules. The payload is never
//! moved to a bigger version: data that does not fit fails with
//! [`QRError::CapacityExceeded`].
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages emit [`tracing`] events. The library never installs a subscriber.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
mod qr;
mod render;

pub use builder::QRBuilder;
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version, DEFAULT_EC_LEVEL, DEFAULT_VERSION};
pub use qr::QR;
pub use render::MAX_CANVAS_PX;
