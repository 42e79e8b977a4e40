mod qr;

pub(crate) use qr::QRGrid;
#[cfg(test)]
pub(crate) use qr::Module;

use tracing::{debug, info};

use crate::common::{
    bit_utils::BitStream,
    codec::{encode_with_version, Mode},
    ec::{ecc, interleave},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version, DEFAULT_EC_LEVEL, DEFAULT_VERSION},
};
use crate::qr::QR;

/// Configures and builds a single [`QR`] symbol.
///
/// Version and error correction level are fixed up front; the payload is
/// never moved to a bigger version. When no mask is given the one with the
/// lowest penalty is picked.
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: DEFAULT_VERSION, ec_level: DEFAULT_EC_LEVEL, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!(
                "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
                *self.version, self.ec_level, *m
            ),
            None => {
                format!("{{ Version: {}, Ec level: {:?}, Mask: None }}", *self.version, self.ec_level)
            }
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        let (grid, mode, mask) = self.build_grid()?;
        let qr = QR::new(&grid, mode, mask)?;

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        info!(
            width = qr.width(),
            mask = *mask,
            ?mode,
            dark_modules,
            balance = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }

    // Runs the whole pipeline up to the masked working grid
    pub(crate) fn build_grid(&self) -> QRResult<(QRGrid, Mode, MaskPattern)> {
        let version = self.version;
        let ec_level = self.ec_level;

        debug!(version = *version, ?ec_level, len = self.data.len(), "Encoding data");
        let (encoded_data, mode) = encode_with_version(self.data, version, ec_level)?;

        debug!(?mode, bits = encoded_data.len(), "Constructing payload with ecc & interleaving");
        let (data_blocks, ecc_blocks) = ecc(encoded_data.data(), version, ec_level)?;
        let mut payload = BitStream::new(version.total_codewords() << 3)?;
        payload.extend(&interleave(&data_blocks)?)?;
        payload.extend(&interleave(&ecc_blocks)?)?;

        debug!(width = version.width(), "Drawing function patterns");
        let mut qr = QRGrid::new(version, ec_level)?;
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region");
        qr.draw_encoding_region(payload);

        let mask = match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying requested mask");
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding & applying best mask");
                apply_best_mask(&mut qr)
            }
        };

        Ok((qr, mode, mask))
    }
}
