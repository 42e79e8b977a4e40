use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Dark,
    Light,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

/// QR Code (Model 2) size class, 1 to 40.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Bytes needed to hold the packed module grid of this version.
    pub const fn grid_buffer_len(self) -> usize {
        let w = self.width();
        (w * w + 7) >> 3
    }

    /// Modules left for codewords once every function pattern is drawn.
    pub fn raw_data_modules(self) -> usize {
        NUM_RAW_DATA_MODULES[self.0 - 1]
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn total_ecc_codewords(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_CODEWORDS[ecl as usize][self.0 - 1]
    }

    pub fn ec_block_count(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ecl as usize][self.0 - 1]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.total_ecc_codewords(ecl) / self.ec_block_count(ecl)
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.total_ecc_codewords(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    // Returns (short block data len, short block count, long block data len, long block count).
    // Short blocks always precede long blocks.
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let total = self.total_codewords();
        let blocks = self.ec_block_count(ecl);
        let long_count = total % blocks;
        let short_count = blocks - long_count;
        let short_size = total / blocks - self.ecc_per_block(ecl);
        (short_size, short_count, short_size + 1, long_count)
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        match self.0 {
            1..=9 => match mode {
                Mode::Numeric => 10,
                Mode::Alphanumeric => 9,
                Mode::Byte => 8,
            },
            10..=26 => match mode {
                Mode::Numeric => 12,
                Mode::Alphanumeric => 11,
                Mode::Byte => 16,
            },
            _ => match mode {
                Mode::Numeric => 14,
                Mode::Alphanumeric => 13,
                Mode::Byte => 16,
            },
        }
    }

    /// Row/column centres of the alignment patterns, ascending. Empty for version 1.
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }

        let count = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + count * 2 + 1) / (count * 2 - 2) * 2 };
        let last = self.width() - 7;

        let mut poses = Vec::with_capacity(count);
        poses.push(6);
        poses.extend((0..count - 1).rev().map(|i| (last - i * step) as i16));
        poses
    }

    // 6 version bits followed by a BCH(18,6) remainder
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only drawn from version 7: {}", self.0);

        let ver = self.0 as u32;
        let mut rem = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_INFO_GENERATOR);
        }
        ver << 12 | rem
    }
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

#[cfg(test)]
pub(crate) static ECL_ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

impl ECLevel {
    // Two bit indicator carried by the format information
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Format information
//------------------------------------------------------------------------------

// 5 data bits followed by a BCH(15,5) remainder, xored with the format mask
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = ecl.format_bits() << 3 | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
    }
    (data << 10 | rem) ^ FORMAT_INFO_MASK
}

#[cfg(test)]
mod format_info_tests {
    use test_case::test_case;

    use super::{format_info, ECLevel};
    use crate::common::mask::MaskPattern;

    #[test_case(ECLevel::L, 0, 0x77C4)]
    #[test_case(ECLevel::L, 7, 0x6976)]
    #[test_case(ECLevel::M, 0, 0x5412)]
    #[test_case(ECLevel::M, 5, 0x40CE)]
    #[test_case(ECLevel::Q, 0, 0x355F)]
    #[test_case(ECLevel::H, 0, 0x1689)]
    #[test_case(ECLevel::H, 7, 0x083B)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        assert_eq!(format_info(ecl, MaskPattern::new(mask).unwrap()), exp);
    }
}

// Global constants
//------------------------------------------------------------------------------

/// Version used when the caller does not pick one. Fits a 60 character URL at level L.
pub const DEFAULT_VERSION: Version = Version(15);

pub const DEFAULT_EC_LEVEL: ECLevel = ECLevel::L;

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static VERSION_INFO_BIT_LEN: usize = 18;

static FORMAT_INFO_GENERATOR: u32 = 0x537;

static FORMAT_INFO_MASK: u32 = 0x5412;

static VERSION_INFO_GENERATOR: u32 = 0x1F25;

// Indexed by [ECLevel][version - 1]
static NUM_ERROR_CORRECTION_CODEWORDS: [[usize; 40]; 4] = [
    [
        7, 10, 15, 20, 26, 36, 40, 48, 60, 72, 80, 96, 104, 120, 132, 144, 168, 180, 196, 224,
        224, 252, 270, 300, 312, 336, 360, 390, 420, 450, 480, 510, 540, 570, 570, 600, 630, 660,
        720, 750,
    ],
    [
        10, 16, 26, 36, 48, 64, 72, 88, 110, 130, 150, 176, 198, 216, 240, 280, 308, 338, 364,
        416, 442, 476, 504, 560, 588, 644, 700, 728, 784, 812, 868, 924, 980, 1036, 1064, 1120,
        1204, 1260, 1316, 1372,
    ],
    [
        13, 22, 36, 52, 72, 96, 108, 132, 160, 192, 224, 260, 288, 320, 360, 408, 448, 504, 546,
        600, 644, 690, 750, 810, 870, 952, 1020, 1050, 1140, 1200, 1290, 1350, 1440, 1530, 1590,
        1680, 1770, 1860, 1950, 2040,
    ],
    [
        17, 28, 44, 64, 88, 112, 130, 156, 192, 224, 264, 308, 352, 384, 432, 480, 532, 588, 650,
        700, 750, 816, 900, 960, 1050, 1110, 1200, 1260, 1350, 1440, 1530, 1620, 1710, 1800,
        1890, 1980, 2100, 2220, 2310, 2430,
    ],
];

// Indexed by [ECLevel][version - 1]
static NUM_ERROR_CORRECTION_BLOCKS: [[usize; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

// Indexed by [version - 1]
static NUM_RAW_DATA_MODULES: [usize; 40] = [
    208, 359, 567, 807, 1079, 1383, 1568, 1936, 2336, 2768, 3232, 3728, 4256, 4651, 5243, 5867,
    6523, 7211, 7931, 8683, 9252, 10068, 10916, 11796, 12708, 13652, 14628, 15371, 16411, 17483,
    18587, 19723, 20891, 22091, 23008, 24272, 25568, 26896, 28256, 29648,
];
