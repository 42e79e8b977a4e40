// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    /// Picks the most compact single mode able to represent every byte of `data`.
    pub fn classify(data: &[u8]) -> Self {
        MODES.iter().copied().find(|m| data.iter().all(|b| m.contains(*b))).unwrap_or(Self::Byte)
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALNUM_VALUES[byte as usize] != NOT_ALNUM,
            Self::Byte => true,
        }
    }

    // Packs up to 3 digits, 2 alphanumeric chars or 1 byte into one value
    pub fn encode_chunk(&self, chunk: &[u8]) -> u16 {
        debug_assert!(chunk.iter().all(|b| self.contains(*b)), "{self:?} can't hold {chunk:?}");
        match self {
            Self::Numeric => {
                debug_assert!(chunk.len() <= 3, "Numeric chunk too long: {}", chunk.len());
                chunk.iter().fold(0, |acc, &b| acc * 10 + u16::from(b - b'0'))
            }
            Self::Alphanumeric => {
                debug_assert!(chunk.len() <= 2, "Alphanumeric chunk too long: {}", chunk.len());
                chunk.iter().fold(0, |acc, &b| acc * 45 + u16::from(ALNUM_VALUES[b as usize]))
            }
            Self::Byte => {
                debug_assert!(chunk.len() == 1, "Byte chunk must be one byte: {}", chunk.len());
                u16::from(chunk[0])
            }
        }
    }

    // Payload bits for `len` characters, excluding the header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode::{self, *};

    #[test_case(b"12345", Numeric)]
    #[test_case(b"", Numeric)]
    #[test_case(b"HELLO WORLD", Alphanumeric)]
    #[test_case(b"$%*+-./:0A", Alphanumeric)]
    #[test_case(b"hello", Byte)]
    #[test_case(b"HTTPS://MPAGO.LA/abc", Byte)]
    #[test_case(b"\x00\xff", Byte)]
    fn test_classify(data: &[u8], exp: Mode) {
        assert_eq!(Mode::classify(data), exp);
    }

    #[test_case(Numeric, b"0123456789", b"A /")]
    #[test_case(Alphanumeric, b"09AZ $%*+-./:", b"az@(#\x7f\xff")]
    #[test_case(Byte, b"\x00a@\xff", b"")]
    fn test_contains(mode: Mode, inside: &[u8], outside: &[u8]) {
        assert!(inside.iter().all(|b| mode.contains(*b)));
        assert!(outside.iter().all(|b| !mode.contains(*b)));
    }

    #[test_case(Numeric, b"012", 12)]
    #[test_case(Numeric, b"901", 901)]
    #[test_case(Numeric, b"67", 67)]
    #[test_case(Numeric, b"8", 8)]
    #[test_case(Alphanumeric, b"AC", 10 * 45 + 12)]
    #[test_case(Alphanumeric, b"-4", 41 * 45 + 4)]
    #[test_case(Alphanumeric, b"::", 44 * 45 + 44)]
    #[test_case(Alphanumeric, b" ", 36)]
    #[test_case(Byte, b"\xa7", 0xa7)]
    fn test_encode_chunk(mode: Mode, chunk: &[u8], exp: u16) {
        assert_eq!(mode.encode_chunk(chunk), exp);
    }

    #[test]
    #[should_panic]
    fn test_encode_chunk_rejects_foreign_byte() {
        Alphanumeric.encode_chunk(b"a");
    }

    #[test_case(Numeric, 1, 4)]
    #[test_case(Numeric, 2, 7)]
    #[test_case(Numeric, 3, 10)]
    #[test_case(Numeric, 5, 17)]
    #[test_case(Alphanumeric, 1, 6)]
    #[test_case(Alphanumeric, 2, 11)]
    #[test_case(Alphanumeric, 7, 39)]
    #[test_case(Byte, 3, 24)]
    #[test_case(Byte, 0, 0)]
    fn test_encoded_len(mode: Mode, len: usize, exp: usize) {
        assert_eq!(mode.encoded_len(len), exp);
    }
}

// Segment
//------------------------------------------------------------------------------

// Whole payload in a single mode, with the header widths of its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub mode_bits: usize,
    pub len_bits: usize,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, mode_bits, len_bits, data }
    }

    pub fn bit_len(&self) -> usize {
        self.mode_bits + self.len_bits + self.mode.encoded_len(self.data.len())
    }

    // Char count field can't represent the payload length
    pub fn overflows_len_field(&self) -> bool {
        self.data.len() >= 1 << self.len_bits
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

const ALNUM_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

const NOT_ALNUM: u8 = u8::MAX;

// Byte to alphanumeric value, NOT_ALNUM outside the charset
static ALNUM_VALUES: [u8; 256] = {
    let mut table = [NOT_ALNUM; 256];
    let mut i = 0;
    while i < ALNUM_CHARSET.len() {
        table[ALNUM_CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
};
