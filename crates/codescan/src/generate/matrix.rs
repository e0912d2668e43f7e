//! QR rendering backed by qrism, plus the encoder that routes each format
//! to the renderer that can draw it.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use qrism::QRBuilder;

use super::encoder::{BarcodeEncoder, CanvasSize};
use super::linear::LinearEncoder;
use crate::error::EncodeError;
use crate::record::Symbology;

/// White margin kept around the symbol, in modules.
const QUIET_MODULES: u32 = 4;

/// Renders QR codes centred on a white canvas.
///
/// Modules are scaled by the largest whole factor that fits with a quiet
/// zone around the symbol, so every module stays the same size. A canvas
/// too small for that gets a nearest-neighbour resize instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl BarcodeEncoder for QrEncoder {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError> {
        if symbology != Symbology::QrCode {
            return Err(EncodeError::Unsupported(symbology));
        }
        if size.width == 0 || size.height == 0 {
            return Err(EncodeError::Internal(format!(
                "canvas {}x{} has no area",
                size.width, size.height
            )));
        }

        // With version and level left automatic, the builder only fails on
        // the data itself.
        let qr = QRBuilder::new(text.as_bytes())
            .build()
            .map_err(|e| EncodeError::InvalidContent(e.to_string()))?;

        let unit = DynamicImage::from(qr.to_image(1)).to_luma8();
        let (side_w, side_h) = unit.dimensions();
        if side_w == 0 || side_h == 0 {
            return Err(EncodeError::Internal("QR renderer produced an empty image".into()));
        }

        let margin = 2 * QUIET_MODULES;
        let scale = (size.width / (side_w + margin)).min(size.height / (side_h + margin));
        if scale == 0 {
            return Ok(imageops::resize(&unit, size.width, size.height, FilterType::Nearest));
        }

        let symbol = if scale == 1 {
            unit
        } else {
            DynamicImage::from(qr.to_image(scale)).to_luma8()
        };
        let mut canvas = GrayImage::from_pixel(size.width, size.height, Luma([255]));
        let x = (size.width.saturating_sub(symbol.width()) / 2) as i64;
        let y = (size.height.saturating_sub(symbol.height()) / 2) as i64;
        imageops::overlay(&mut canvas, &symbol, x, y);
        Ok(canvas)
    }
}

/// Every format this crate can draw: QR through [`QrEncoder`], EAN-13 and
/// Code 128 through [`LinearEncoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder {
    matrix: QrEncoder,
    linear: LinearEncoder,
}

impl StandardEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BarcodeEncoder for StandardEncoder {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError> {
        match symbology {
            Symbology::QrCode => self.matrix.encode(text, symbology, size),
            _ => self.linear.encode(text, symbology, size),
        }
    }
}
