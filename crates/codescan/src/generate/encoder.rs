//! The encode adapter seam and the generator that guards it.

use image::GrayImage;

use super::validate::validate;
use crate::config::GeneratorConfig;
use crate::error::{EncodeError, GenerateError};
use crate::record::Symbology;

/// Target raster size for a generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square canvas for matrix formats, wide canvas for linear ones.
    pub fn for_symbology(symbology: Symbology, config: &GeneratorConfig) -> Self {
        if symbology.is_matrix() {
            Self::new(config.matrix_size, config.matrix_size)
        } else {
            Self::new(config.linear_width, config.linear_height)
        }
    }
}

/// Renders text as a barcode image.
///
/// Implementations report malformed input as [`EncodeError::InvalidContent`]
/// and their own failures as [`EncodeError::Internal`].
pub trait BarcodeEncoder: Send + Sync {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError>;
}

impl<E: BarcodeEncoder + ?Sized> BarcodeEncoder for Box<E> {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError> {
        (**self).encode(text, symbology, size)
    }
}

/// Validates input, then hands it to an encoder.
///
/// Every failure comes back as a [`GenerateError`] carrying user-facing text.
pub struct Generator<E> {
    encoder: E,
    config: GeneratorConfig,
}

impl<E: BarcodeEncoder> Generator<E> {
    pub fn new(encoder: E) -> Self {
        Self::with_config(encoder, GeneratorConfig::default())
    }

    pub fn with_config(encoder: E, config: GeneratorConfig) -> Self {
        Self { encoder, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, text: &str, symbology: Symbology) -> Result<GrayImage, GenerateError> {
        validate(text, symbology)?;

        let size = CanvasSize::for_symbology(symbology, &self.config);
        match self.encoder.encode(text, symbology, size) {
            Ok(image) => {
                log::debug!(
                    "Generated {} ({}x{})",
                    symbology,
                    image.width(),
                    image.height()
                );
                Ok(image)
            }
            Err(e) => {
                log::warn!("Failed to generate {}: {}", symbology, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Blank {
        calls: AtomicUsize,
    }

    impl BarcodeEncoder for Blank {
        fn encode(
            &self,
            _: &str,
            _: Symbology,
            size: CanvasSize,
        ) -> Result<GrayImage, EncodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GrayImage::new(size.width, size.height))
        }
    }

    struct Failing(EncodeError);

    impl BarcodeEncoder for Failing {
        fn encode(&self, _: &str, _: Symbology, _: CanvasSize) -> Result<GrayImage, EncodeError> {
            Err(self.0.clone())
        }
    }

    fn blank() -> Blank {
        Blank {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_canvas_size() {
        let config = GeneratorConfig::default();
        assert_eq!(
            CanvasSize::for_symbology(Symbology::QrCode, &config),
            CanvasSize::new(400, 400)
        );
        assert_eq!(
            CanvasSize::for_symbology(Symbology::Ean13, &config),
            CanvasSize::new(400, 200)
        );
    }

    #[test]
    fn test_generate_uses_canvas_for_format() {
        let generator = Generator::new(blank());
        let qr = generator.generate("hello", Symbology::QrCode).unwrap();
        assert_eq!(qr.dimensions(), (400, 400));
        let ean = generator.generate("123456789012", Symbology::Ean13).unwrap();
        assert_eq!(ean.dimensions(), (400, 200));
    }

    #[test]
    fn test_invalid_input_never_reaches_encoder() {
        let generator = Generator::new(blank());
        assert!(generator.generate("12345", Symbology::Ean13).is_err());
        assert!(generator.generate("", Symbology::QrCode).is_err());
        assert_eq!(generator.encoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_encoder_failures_become_messages() {
        let malformed = Generator::new(Failing(EncodeError::InvalidContent(
            "bad check digit".into(),
        )));
        let err = malformed.generate("hello", Symbology::Code128).unwrap_err();
        assert_eq!(err.to_string(), "Invalid content: bad check digit");

        let internal = Generator::new(Failing(EncodeError::Internal("out of memory".into())));
        let err = internal.generate("hello", Symbology::QrCode).unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: out of memory");
    }

    #[test]
    fn test_boxed_encoder() {
        let generator: Generator<Box<dyn BarcodeEncoder>> = Generator::with_config(
            Box::new(blank()),
            GeneratorConfig {
                matrix_size: 64,
                linear_width: 120,
                linear_height: 40,
            },
        );
        let image = generator.generate("x", Symbology::QrCode).unwrap();
        assert_eq!(image.dimensions(), (64, 64));
    }
}
