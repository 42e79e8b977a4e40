use std::ops::Deref;

use super::galois::{generator_polynomial, gf_mul};
use crate::common::{
    error::QRResult,
    metadata::{ECLevel, Version},
};

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, version, ec_level);

    let gen_poly = generator_polynomial(version.ecc_per_block(ec_level))?;
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<QRResult<Vec<_>>>()?;

    Ok((data_blocks, ecc_blocks))
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_count > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Performs polynomial long division with data polynomial(num)
// and generator polynomial(den) to compute remainder polynomial,
// the coefficients of which are the ecc
fn ecc_per_block(block: &[u8], gen_poly: &[u8]) -> QRResult<Vec<u8>> {
    let len = block.len();
    let ecc_count = gen_poly.len();

    let mut res = Vec::new();
    res.try_reserve_exact(len + ecc_count)?;
    res.extend_from_slice(block);
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }

        for (u, v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            *u ^= gf_mul(*v, lead_coeff);
        }
    }

    Ok(res.split_off(len))
}

// Takes the i-th codeword of every block in block order, skipping blocks
// that are already exhausted
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> QRResult<Vec<T>> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();

    let mut res = Vec::new();
    res.try_reserve_exact(total_size)?;
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    Ok(res)
}

#[cfg(test)]
mod ec_tests {

    use super::{blockify, ecc, ecc_per_block, interleave};
    use crate::common::{
        ec::galois::generator_polynomial,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_poly_mod_1() {
        let gen = generator_polynomial(10).unwrap();
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", &gen).unwrap();
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let gen = generator_polynomial(13).unwrap();
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", &gen).unwrap();
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let gen = generator_polynomial(18).unwrap();
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", &gen).unwrap();
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (blocks, ecc) = ecc(msg, Version::new(1).unwrap(), ECLevel::M).unwrap();
        assert_eq!(blocks, vec![&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = ecc(msg, Version::new(5).unwrap(), ECLevel::Q).unwrap();
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify_short_before_long() {
        let data = (0..62u8).collect::<Vec<_>>();
        let blocks = blockify(&data, Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(blocks.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
        assert_eq!(blocks[3][15], 61);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks).unwrap();
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_interleave_short_and_long_blocks() {
        let blocks: Vec<&[u8]> = vec![&[1, 2], &[3, 4], &[5, 6, 7], &[8, 9, 10]];
        assert_eq!(interleave(&blocks).unwrap(), vec![1, 3, 5, 8, 2, 4, 6, 9, 7, 10]);
    }
}
