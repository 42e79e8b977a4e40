use std::cmp::min;
use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

use super::error::{QRError, QRResult};

// Bit stream
//------------------------------------------------------------------------------

/// Append-only bit sequence with a fixed bit capacity. Bits are packed
/// MSB-first within each byte.
#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> QRResult<Self> {
        let byte_len = (capacity + 7) >> 3;
        let mut data = Vec::new();
        data.try_reserve_exact(byte_len)?;
        data.resize(byte_len, 0);
        Ok(Self { data, len: 0, capacity, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize) -> QRResult<()>
    where
        T: PrimInt + Into<u32> + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(size <= 32, "Cannot push more than 32 bits at once: Size {size}");

        if self.len + size > self.capacity {
            return Err(QRError::CapacityOverflow);
        }

        let bits: u32 = bits.into();
        let mut rem = size;
        while rem > 0 {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            let n = min(rem, 8 - offset);
            let chunk = ((bits >> (rem - n)) & ((1 << n) - 1)) as u8;
            self.data[pos] |= chunk << (8 - offset - n);
            self.len += n;
            rem -= n;
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn push(&mut self, bit: bool) -> QRResult<()> {
        if self.len >= self.capacity {
            return Err(QRError::CapacityOverflow);
        }

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
        Ok(())
    }

    pub fn extend(&mut self, arr: &[u8]) -> QRResult<()> {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );

        let arr_bits = arr.len() << 3;
        if self.len + arr_bits > self.capacity {
            return Err(QRError::CapacityOverflow);
        }

        let pos = self.len >> 3;
        self.data[pos..pos + arr.len()].copy_from_slice(arr);
        self.len += arr_bits;
        Ok(())
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    #[cfg(test)]
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }

        let mut res = 0u16;
        for _ in 0..n {
            res = (res << 1) | self.take()? as u16;
        }
        Some(res)
    }

    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}


// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}

// Bit grid
//------------------------------------------------------------------------------

/// Square bit surface stored row-major and packed MSB-first, so cell (x, y)
/// lives at bit `y * w + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    data: Vec<u8>,
    w: usize,
}

impl BitGrid {
    pub fn new(w: usize) -> QRResult<Self> {
        let byte_len = (w * w + 7) >> 3;
        let mut data = Vec::new();
        data.try_reserve_exact(byte_len)?;
        data.resize(byte_len, 0);
        Ok(Self { data, w })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.w, "Out of grid bounds: W {}, X {x}, Y {y}", self.w);

        let pos = y * self.w + x;
        self.data[pos >> 3] & (0b10000000 >> (pos & 7)) != 0
    }

    pub fn put(&mut self, x: usize, y: usize, bit: bool) {
        debug_assert!(x < self.w && y < self.w, "Out of grid bounds: W {}, X {x}, Y {y}", self.w);

        let pos = y * self.w + x;
        let offset = pos & 7;
        let index = pos >> 3;

        self.data[index] &= !(0b10000000 >> offset);
        if bit {
            self.data[index] |= 0b10000000 >> offset;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}
