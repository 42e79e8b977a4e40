use image::{GrayImage, Luma};

use crate::common::error::{QRError, QRResult};
use crate::qr::QR;

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Draws the symbol centred on a white square canvas of `canvas_px` pixels,
    /// each module scaled to the largest whole number of pixels that fits.
    pub fn render_canvas(&self, canvas_px: u32) -> QRResult<GrayImage> {
        let w = self.width() as u32;
        let module_sz = canvas_px / w;
        if module_sz == 0 {
            return Err(QRError::CanvasTooSmall);
        }
        if canvas_px > MAX_CANVAS_PX {
            return Err(QRError::CanvasTooLarge);
        }
        let off = (canvas_px - w * module_sz) / 2;

        let mut canvas = blank_canvas(canvas_px)?;
        self.paint(&mut canvas, off, module_sz);
        Ok(canvas)
    }

    /// Draws the symbol with a 4 module quiet zone around it.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::from_pixel(total_sz, total_sz, Luma([255]));
        self.paint(&mut canvas, qz_sz, module_sz);
        canvas
    }

    fn paint(&self, canvas: &mut GrayImage, off: u32, module_sz: u32) {
        let w = self.width() as u32;
        for y in 0..w {
            for x in 0..w {
                if !self.get_module(x as i32, y as i32) {
                    continue;
                }
                for i in 0..module_sz {
                    for j in 0..module_sz {
                        canvas.put_pixel(off + x * module_sz + j, off + y * module_sz + i, Luma([0]));
                    }
                }
            }
        }
    }

    /// Renders for a terminal, light modules as full blocks and dark ones as
    /// blanks, with the quiet zone included.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE as usize * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz * '█'.len_utf8() + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let y = ((i - qz_sz) / module_sz) as i32;
                let x = ((j - qz_sz) / module_sz) as i32;
                canvas.push(if self.get_module(x, y) { ' ' } else { '█' });
            }
            canvas.push('\n');
        }

        canvas
    }
}

// White square canvas, reserved up front so a failed allocation is an error
fn blank_canvas(px: u32) -> QRResult<GrayImage> {
    let len = px as usize * px as usize;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 255u8);
    GrayImage::from_raw(px, px, buf).ok_or(QRError::AllocationFailure)
}


// Global constants
//------------------------------------------------------------------------------

static QUIET_ZONE: u32 = 4;

// Side of the largest canvas `render_canvas` will allocate
pub const MAX_CANVAS_PX: u32 = 1 << 14;
