use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use crate::builder::QRGrid;

/// One of the 8 data mask patterns of the symbol, identified by its 3-bit id.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskPattern);
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Rows are r, columns are c. A module is inverted where the function holds
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) & 1) as i32 + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern out of range: {}", self.0),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Scores every mask on its own copy of the unmasked grid and applies only the
// winner. Ties resolve to the lowest id.
pub(crate) fn apply_best_mask(qr: &mut QRGrid) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for m in 0..8 {
        let mask = MaskPattern(m);
        let mut candidate = qr.clone();
        candidate.apply_mask(mask);
        let penalty = compute_total_penalty(&candidate);
        trace!(mask = m, penalty, "Scored mask candidate");
        if penalty < best.1 {
            best = (mask, penalty);
        }
    }

    qr.apply_mask(best.0);
    best.0
}

pub(crate) fn compute_total_penalty(qr: &QRGrid) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr, true) + compute_adjacent_penalty(qr, false);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen = compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Runs of 5 same colored modules score 3, every extra module in the run scores 1
fn compute_adjacent_penalty(qr: &QRGrid, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut last = None;
        let mut run = 0;
        for j in 0..w {
            let dark = if is_hor { qr.is_dark(i, j) } else { qr.is_dark(j, i) };
            if last == Some(dark) {
                run += 1;
            } else {
                last = Some(dark);
                run = 1;
            }
            match run {
                5 => pen += 3,
                6.. => pen += 1,
                _ => {}
            }
        }
    }
    pen
}

fn compute_block_penalty(qr: &QRGrid) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let dark = qr.is_dark(r, c);
            if dark == qr.is_dark(r + 1, c)
                && dark == qr.is_dark(r, c + 1)
                && dark == qr.is_dark(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Slides an 11 module window along every line looking for a finder like
// 1:1:3:1:1 run with 4 light modules on either side
fn compute_finder_pattern_penalty(qr: &QRGrid, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut window = 0u16;
        for j in 0..w {
            let dark = if is_hor { qr.is_dark(i, j) } else { qr.is_dark(j, i) };
            window = ((window << 1) & WINDOW_MASK) | dark as u16;
            if j >= 10 && (window == FINDER_LIGHT_FIRST || window == FINDER_LIGHT_LAST) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every 5% the dark ratio strays outside 45%..55%
fn compute_balance_penalty(qr: &QRGrid) -> u32 {
    let dark = qr.count_dark_modules();
    let w = qr.width();
    let total = w * w;
    let mut k = 0;
    while dark * 20 < 9usize.saturating_sub(k) * total || dark * 20 > (11 + k) * total {
        k += 1;
    }
    k as u32 * 10
}


// Global constants
//------------------------------------------------------------------------------

static WINDOW_MASK: u16 = 0x7FF;

// Dark-light-dark-dark-dark-light-dark with 4 light modules before or after
static FINDER_LIGHT_FIRST: u16 = 0x05D;

static FINDER_LIGHT_LAST: u16 = 0x5D0;
