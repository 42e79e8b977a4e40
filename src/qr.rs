use crate::builder::QRGrid;
use crate::common::{
    bit_utils::BitGrid,
    codec::Mode,
    error::QRResult,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

/// A finished QR symbol.
///
/// Holds only the packed module grid and the parameters it was built with.
/// Immutable once returned by [`QRBuilder::build`](crate::QRBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    modules: BitGrid,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    mode: Mode,
}

impl QR {
    pub(crate) fn new(grid: &QRGrid, mode: Mode, mask: MaskPattern) -> QRResult<Self> {
        debug_assert!(grid.mask() == Some(mask), "Grid was not masked with {mask:?}");

        let modules = grid.to_bit_grid()?;
        Ok(Self { modules, ver: grid.version(), ecl: grid.ec_level(), mask, mode })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.modules.width()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Packed module grid, row-major and most significant bit first.
    pub fn modules(&self) -> &[u8] {
        self.modules.data()
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.count_ones()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mask: {}, Mode: {:?} }}",
            *self.ver, self.ecl, *self.mask, self.mode
        )
    }

    /// Returns true for a dark module. Coordinates outside the symbol read as light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let w = self.width() as i32;
        if !(0..w).contains(&x) || !(0..w).contains(&y) {
            return false;
        }
        self.modules.get(x as usize, y as usize)
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use crate::builder::QRBuilder;
    use crate::common::{codec::Mode, metadata::ECLevel, metadata::Version};

    fn build(data: &[u8], v: usize, ecl: ECLevel) -> super::QR {
        QRBuilder::new(data).version(Version::new(v).unwrap()).ec_level(ecl).build().unwrap()
    }

    #[test_case(21, 0)]
    #[test_case(0, 21)]
    #[test_case(-1, 0)]
    #[test_case(0, -1)]
    #[test_case(21, 21)]
    #[test_case(i32::MAX, i32::MIN)]
    fn test_out_of_range_is_light(x: i32, y: i32) {
        let qr = build(b"12345", 1, ECLevel::L);
        assert!(!qr.get_module(x, y));
    }

    #[test]
    fn test_fixed_modules() {
        let qr = build(b"12345", 1, ECLevel::L);
        let w = qr.width() as i32;
        // Finder corners
        assert!(qr.get_module(0, 0));
        assert!(qr.get_module(w - 1, 0));
        assert!(qr.get_module(0, w - 1));
        assert!(!qr.get_module(7, 7));
        // Timing
        assert!(qr.get_module(8, 6));
        assert!(!qr.get_module(6, 9));
        // Dark module
        assert!(qr.get_module(8, w - 8));
    }

    #[test]
    fn test_accessors() {
        let qr = build(b"12345", 1, ECLevel::L);
        assert_eq!(qr.mode(), Mode::Numeric);
        assert_eq!(qr.version(), Version::new(1).unwrap());
        assert_eq!(qr.ec_level(), ECLevel::L);
        assert_eq!(qr.modules().len(), Version::new(1).unwrap().grid_buffer_len());
        let dark = (0..21).flat_map(|y| (0..21).map(move |x| (x, y)));
        assert_eq!(dark.filter(|&(x, y)| qr.get_module(x, y)).count(), qr.count_dark_modules());
        assert_eq!(
            qr.metadata(),
            format!("{{ Version: 1, Ec level: L, Mask: {}, Mode: Numeric }}", *qr.mask())
        );
    }

    #[test]
    fn test_packed_layout() {
        let qr = build(b"HELLO WORLD", 1, ECLevel::Q);
        let w = qr.width();
        for y in 0..w {
            for x in 0..w {
                let i = y * w + x;
                let bit = qr.modules()[i >> 3] >> (7 - (i & 7)) & 1 == 1;
                assert_eq!(bit, qr.get_module(x as i32, y as i32));
            }
        }
    }

    #[test]
    fn test_qr_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::QR>();
    }
}
