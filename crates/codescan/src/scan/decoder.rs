//! The decode adapter seam and the values it produces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Symbology;

/// Axis-aligned region of a frame, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (u32, u32) {
        (
            self.left.saturating_add(self.width / 2),
            self.top.saturating_add(self.height / 2),
        )
    }

    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && x < self.left.saturating_add(self.width)
            && y < self.top.saturating_add(self.height)
    }

    /// Whether `other`'s centre lies inside this region.
    pub fn contains_center_of(&self, other: &Region) -> bool {
        let (x, y) = other.center();
        self.contains_point(x, y)
    }
}

/// One code found in a frame or still image.
///
/// An empty payload means the adapter saw something but could not read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCode {
    pub payload: String,
    pub symbology: Symbology,
    pub region: Option<Region>,
}

impl DecodedCode {
    pub fn new(payload: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            payload: payload.into(),
            symbology,
            region: None,
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

/// Failure reported by a decode adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// A barcode decoding library, consumed as a black box.
///
/// Called from the frame-analysis thread for camera frames and from the
/// interactive context for gallery images.
pub trait Decoder: Send + Sync {
    fn decode(&self, image: &image::GrayImage) -> Result<Vec<DecodedCode>, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&image::GrayImage) -> Result<Vec<DecodedCode>, DecodeError> + Send + Sync,
{
    fn decode(&self, image: &image::GrayImage) -> Result<Vec<DecodedCode>, DecodeError> {
        self(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_center_and_contains() {
        let window = Region::new(100, 100, 200, 200);
        assert_eq!(window.center(), (200, 200));
        assert!(window.contains_point(100, 100));
        assert!(window.contains_point(299, 299));
        assert!(!window.contains_point(300, 300));
        assert!(!window.contains_point(99, 150));
    }

    #[test]
    fn test_center_near_edge_of_range() {
        let region = Region::new(u32::MAX - 10, u32::MAX - 4, 100, 100);
        assert_eq!(region.center(), (u32::MAX, u32::MAX));
        assert!(!Region::new(0, 0, 500, 500).contains_center_of(&region));
    }

    #[test]
    fn test_contains_center_of() {
        let window = Region::new(100, 100, 200, 200);
        assert!(window.contains_center_of(&Region::new(150, 150, 20, 20)));
        // Overlaps the window but centred outside it.
        assert!(!window.contains_center_of(&Region::new(280, 280, 100, 100)));
    }

    #[test]
    fn test_closure_decoder() {
        let decoder = |_: &image::GrayImage| -> Result<Vec<DecodedCode>, DecodeError> {
            Ok(vec![DecodedCode::new("x", Symbology::QrCode)])
        };
        let frame = image::GrayImage::new(4, 4);
        let codes = decoder.decode(&frame).unwrap();
        assert_eq!(codes[0].payload, "x");
        assert!(codes[0].region.is_none());
    }
}
