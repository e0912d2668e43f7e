//! QR reading backed by qrism.

use image::{DynamicImage, GrayImage};
use qrism::reader::detect_qr;

use super::decoder::{DecodeError, DecodedCode, Decoder};
use crate::record::Symbology;

/// Finds and reads every QR symbol in a grayscale image.
///
/// A symbol that is located but cannot be read comes back with an empty
/// payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrDecoder;

impl Decoder for QrDecoder {
    fn decode(&self, image: &GrayImage) -> Result<Vec<DecodedCode>, DecodeError> {
        let mut result = detect_qr(&DynamicImage::ImageLuma8(image.clone()));

        let codes = result
            .symbols()
            .iter_mut()
            .map(|symbol| match symbol.decode() {
                Ok((_, message)) => DecodedCode::new(message, Symbology::QrCode),
                Err(e) => {
                    log::debug!("Located a QR symbol but could not read it: {}", e);
                    DecodedCode::new("", Symbology::QrCode)
                }
            })
            .collect::<Vec<_>>();

        log::trace!("QR pass found {} symbol(s)", codes.len());
        Ok(codes)
    }
}
