use std::ops::Deref;

use crate::common::{
    bit_utils::{BitGrid, BitStream},
    error::QRResult,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{format_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

// Working grid of the builder. Every module remembers which region it belongs
// to so masking only ever touches data modules. Dropped once the packed grid
// is produced.
#[derive(Debug, Clone)]
pub(crate) struct QRGrid {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR grid for builder
//------------------------------------------------------------------------------

impl QRGrid {
    pub fn new(ver: Version, ecl: ECLevel) -> QRResult<Self> {
        let w = ver.width();
        let mut grid = Vec::new();
        grid.try_reserve_exact(w * w)?;
        grid.resize(w * w, Module::Empty);
        Ok(Self { grid, w, ver, ecl, mask: None })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be within -w..w: {r}");
        debug_assert!(-w <= c && c < w, "column should be within -w..w: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        r as usize * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    pub fn is_dark(&self, r: i16, c: i16) -> bool {
        *self.get(r, c) == Color::Dark
    }

    // Packs the grid row-major, x being the column and y the row
    pub fn to_bit_grid(&self) -> QRResult<BitGrid> {
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found while packing");

        let mut bits = BitGrid::new(self.w)?;
        for (i, m) in self.grid.iter().enumerate() {
            if **m == Color::Dark {
                bits.put(i % self.w, i / self.w, true);
            }
        }
        Ok(bits)
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QRGrid {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder with its light separator ring, clipped to the grid
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        let (r, c) = (if r < 0 { r + w } else { r }, if c < 0 { c + w } else { c });
        for i in -4i16..=4 {
            for j in -4i16..=4 {
                let (mr, mc) = (r + i, c + j);
                if !(0..w).contains(&mr) || !(0..w).contains(&mc) {
                    continue;
                }
                let clr = match i.abs().max(j.abs()) {
                    2 | 4 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(mr, mc, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QRGrid {
    // Alternating line on row 6 and column 6 between the finder separators,
    // dark on even indices
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let clr = if i & 1 == 0 { Color::Dark } else { Color::Light };
            self.set(6, i, Module::Func(clr));
            self.set(i, 6, Module::Func(clr));
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QRGrid {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in &poses {
            for &c in &poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let last = self.w as i16 - 7;
        // Positions overlapping the finder patterns
        if (r == 6 && (c == 6 || c == last)) || (r == last && c == 6) {
            return;
        }
        for i in -2i16..=2 {
            for j in -2i16..=2 {
                let clr = if i.abs().max(j.abs()) == 1 { Color::Light } else { Color::Dark };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use crate::builder::QRGrid;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_alignment_pattern_1() {
        let mut qr = QRGrid::new(Version::new(1).unwrap(), ECLevel::L).unwrap();
        qr.draw_alignment_patterns();
        assert!(!qr.to_debug_str().contains('f'));
    }

    #[test]
    fn test_alignment_pattern_3() {
        let mut qr = QRGrid::new(Version::new(3).unwrap(), ECLevel::L).unwrap();
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............Ffffffff\n\
             fFFFFFfF.............FfFFFFFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFFFFFfF.............FfFFFFFf\n\
             fffffffF.............Ffffffff\n\
             FFFFFFFF.............FFFFFFFF\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             ....................fffff....\n\
             FFFFFFFF............fFFFf....\n\
             fffffffF............fFfFf....\n\
             fFFFFFfF............fFFFf....\n\
             fFfffFfF............fffff....\n\
             fFfffFfF.....................\n\
             fFfffFfF.....................\n\
             fFFFFFfF.....................\n\
             fffffffF.....................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_7() {
        let mut qr = QRGrid::new(Version::new(7).unwrap(), ECLevel::L).unwrap();
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............................Ffffffff\n\
             fFFFFFfF.............................FfFFFFFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF............fffff............FfFfffFf\n\
             fFFFFFfF............fFFFf............FfFFFFFf\n\
             fffffffF............fFfFf............Ffffffff\n\
             FFFFFFFF............fFFFf............FFFFFFFF\n\
             ....................fffff....................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....................fffff...........fffff....\n\
             FFFFFFFF............fFFFf...........fFFFf....\n\
             fffffffF............fFfFf...........fFfFf....\n\
             fFFFFFfF............fFFFf...........fFFFf....\n\
             fFfffFfF............fffff...........fffff....\n\
             fFfffFfF.....................................\n\
             fFfffFfF.....................................\n\
             fFFFFFfF.....................................\n\
             fffffffF.....................................\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QRGrid {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QRGrid {
    // Marks the format area so placement skips it. Overwritten once a mask is chosen
    pub fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let on = Module::Format(Color::Dark);
        let off = Module::Format(Color::Light);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_SIDE);
        self.set(-8, 8, on);
    }

    pub fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }

        let ver_info = self.ver.info();
        let coords = (0..VERSION_INFO_BIT_LEN as i16)
            .map(|i| (i / 3, i % 3 - 11))
            .collect::<Vec<_>>();
        let mirrored = coords.iter().map(|&(r, c)| (c, r)).collect::<Vec<_>>();
        let on = Module::Version(Color::Dark);
        let off = Module::Version(Color::Light);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &coords);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &mirrored);
    }

    // Writes bit i of `number`, least significant first, to `coords[i]`
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        debug_assert!(coords.len() == bit_len, "Expected {bit_len} coords, got {}", coords.len());

        for (i, &(r, c)) in coords.iter().enumerate() {
            if number >> i & 1 == 0 {
                self.set(r, c, off_clr);
            } else {
                self.set(r, c, on_clr);
            }
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QRGrid {
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        self.reserve_format_area();
        self.draw_version_info();

        let mut coords = EncRegionIter::new(self.ver);
        for bit in payload {
            let module = Module::Data(Color::from(bit));
            for (r, c) in coords.by_ref() {
                if matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        let rem = self.fill_remainder_bits(coords);
        debug_assert_eq!(rem, self.ver.remainder_bits(), "Remainder bit count mismatch");

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in debug");
    }

    // Modules left over after the last codeword stay light
    fn fill_remainder_bits(&mut self, coords: impl Iterator<Item = (i16, i16)>) -> usize {
        let mut n = 0;
        for (r, c) in coords {
            if matches!(self.get(r, c), Module::Empty) {
                self.set(r, c, Module::Data(Color::Light));
                n += 1;
            }
        }
        n
    }

    // Inverts data modules where the mask function holds and writes the
    // matching format info
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
        let format_info = format_info(self.ecl, pattern);
        self.draw_format_info(format_info);
    }
}


// Global constants
//------------------------------------------------------------------------------

// Bit i of the format info goes to coords[i], as (row, col)
static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];
