use crate::common::error::QRResult;

// Galois field GF(256) arithmetic
//------------------------------------------------------------------------------

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

#[inline]
pub fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

// Coefficients of prod(x - 2^i) for i in 0..degree, highest power first and
// without the leading monic term
pub fn generator_polynomial(degree: usize) -> QRResult<Vec<u8>> {
    debug_assert!(degree > 0, "Generator polynomial must have a positive degree");

    let mut coeffs = Vec::new();
    coeffs.try_reserve_exact(degree)?;
    coeffs.resize(degree, 0);
    coeffs[degree - 1] = 1;

    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            coeffs[j] = gf_mul(coeffs[j], root);
            if j + 1 < degree {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = gf_mul(root, 2);
    }
    Ok(coeffs)
}


// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLY: u16 = 0x11D;

pub static EXP_TABLE: [u8; 256] = build_tables().0;

pub static LOG_TABLE: [u8; 256] = build_tables().1;
