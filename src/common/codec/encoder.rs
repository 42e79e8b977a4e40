pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::warn;

    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};

    /// Packs `data` into a data codeword stream filling the full data capacity of
    /// `ver` at `ecl`, terminated and padded.
    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
    ) -> QRResult<(BitStream, Mode)> {
        let bcap = ver.data_bit_capacity(ecl);
        let mode = Mode::classify(data);
        let seg = Segment::new(mode, ver.mode_bits(), ver.char_cnt_bits(mode), data);
        let sz = seg.bit_len();
        if sz > bcap || seg.overflows_len_field() {
            warn!(version = *ver, ?ecl, ?mode, bits = sz, capacity = bcap, "Data too long");
            return Err(QRError::CapacityExceeded);
        }

        let mut bs = BitStream::new(bcap)?;
        push_segment(seg, &mut bs)?;
        push_terminator(&mut bs)?;
        pad_remaining_capacity(&mut bs)?;
        Ok((bs, mode))
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::error::QRResult;

    pub fn push_segment(seg: Segment, out: &mut BitStream) -> QRResult<()> {
        push_header(&seg, out)?;
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) -> QRResult<()> {
        out.push_bits(seg.mode as u8, seg.mode_bits)?;
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits)
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len)?;
        }
        Ok(())
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len)?;
        }
        Ok(())
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for &b in data {
            out.push_bits(b, 8)?;
        }
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream) -> QRResult<()> {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len)?;
        }
        Ok(())
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) -> QRResult<()> {
        push_padding_bits(out)?;
        push_padding_codewords(out)
    }

    fn push_padding_bits(out: &mut BitStream) -> QRResult<()> {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len)?;
        }
        Ok(())
    }

    fn push_padding_codewords(out: &mut BitStream) -> QRResult<()> {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        for pc in PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity) {
            out.push_bits(pc, 8)?;
        }
        Ok(())
    }

}
