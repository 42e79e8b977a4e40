use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks every module of the symbol in codeword placement order: column pairs
// from the right edge leftwards, skipping the vertical timing column, snaking
// up and down. Within a pair the right column comes first. Yields (row, col).
pub struct EncRegionIter {
    right: i16,
    vert: i16,
    j: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { right: w - 1, vert: 0, j: 0, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.right < 1 {
            return None;
        }

        let c = self.right - self.j;
        let upward = (self.right + 1) & 2 == 0;
        let r = if upward { self.width - 1 - self.vert } else { self.vert };

        self.j += 1;
        if self.j == 2 {
            self.j = 0;
            self.vert += 1;
            if self.vert == self.width {
                self.vert = 0;
                self.right -= 2;
                if self.right == VERT_TIMING_COL {
                    self.right -= 1;
                }
            }
        }

        Some((r, c))
    }
}

#[cfg(test)]
mod iter_tests {
    use super::EncRegionIter;
    use crate::builder::{Module, QRBuilder};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_enc_region_iter_start() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).take(6).collect::<Vec<_>>();
        assert_eq!(coords, vec![(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_enc_region_iter_turns_at_edges() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).collect::<Vec<_>>();
        // Second column pair runs downward
        assert_eq!(coords[42], (0, 18));
        assert_eq!(coords[43], (0, 17));
        // Timing column is skipped, last pair is columns 1 and 0
        assert!(coords.iter().all(|&(_, c)| c != 6));
        assert_eq!(coords.last(), Some(&(20, 0)));
        assert_eq!(coords.len(), 21 * 20);
    }

    #[test]
    fn test_enc_region_iter() {
        for v in 1..=40 {
            let data = "Hello, world!".as_bytes();
            let version = Version::new(v).unwrap();
            let ec_level = ECLevel::L;
            let (qr, ..) =
                QRBuilder::new(data).version(version).ec_level(ec_level).build_grid().unwrap();
            let coords = EncRegionIter::new(version);
            let total_codewords = coords
                .into_iter()
                .filter(|(r, c)| matches!(qr.get(*r, *c), Module::Data(_)))
                .count()
                / 8;
            let exp_codewords = version.total_codewords();
            assert_eq!(total_codewords, exp_codewords);
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

static VERT_TIMING_COL: i16 = 6;
