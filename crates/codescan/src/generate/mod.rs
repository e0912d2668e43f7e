//! Barcode generation: input validation, the encode adapter seam and the
//! built-in QR and linear encoders.

pub mod encoder;
pub mod linear;
pub mod matrix;
pub mod validate;

use std::path::Path;

use image::GrayImage;

pub use encoder::{BarcodeEncoder, CanvasSize, Generator};
pub use linear::LinearEncoder;
pub use matrix::{QrEncoder, StandardEncoder};
pub use validate::validate;

use crate::error::GenerateError;

/// Writes a generated code to `path` as PNG.
pub fn save_png(image: &GrayImage, path: &Path) -> Result<(), GenerateError> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| GenerateError::EncoderFailed(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Symbology;

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let image = Generator::new(LinearEncoder)
            .generate("4006381333931", Symbology::Ean13)
            .unwrap();

        save_png(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_save_qr_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        let image = Generator::new(StandardEncoder::new())
            .generate("https://example.com", Symbology::QrCode)
            .unwrap();

        save_png(&image, &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_luma8().dimensions(), (400, 400));
    }
}
