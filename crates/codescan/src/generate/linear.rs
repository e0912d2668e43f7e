//! Built-in encoder for EAN-13 and Code 128.
//!
//! Symbols are built as run-width sequences of alternating colors, starting
//! with a white quiet zone, then scaled onto the canvas by a whole number of
//! pixels per module and centered.

use image::{GrayImage, Luma};

use super::encoder::{BarcodeEncoder, CanvasSize};
use crate::error::EncodeError;
use crate::record::Symbology;

/// Left-hand odd parity (set A). Each digit is space, bar, space, bar.
const EAN13_A: [[u8; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// Left-hand even parity (set B), set A mirrored.
const EAN13_B: [[u8; 4]; 10] = [
    [1, 1, 2, 3],
    [1, 2, 2, 2],
    [2, 2, 1, 2],
    [1, 1, 4, 1],
    [2, 3, 1, 1],
    [1, 3, 2, 1],
    [4, 1, 1, 1],
    [2, 1, 3, 1],
    [3, 1, 2, 1],
    [2, 1, 1, 3],
];

/// Right-hand set C has the widths of set A with bars and spaces swapped.
const EAN13_C: [[u8; 4]; 10] = EAN13_A;

/// Parity of the six left digits per leading digit; `true` selects set B.
const EAN13_PARITY: [[bool; 6]; 10] = [
    [false, false, false, false, false, false],
    [false, false, true, false, true, true],
    [false, false, true, true, false, true],
    [false, false, true, true, true, false],
    [false, true, false, false, true, true],
    [false, true, true, false, false, true],
    [false, true, true, true, false, false],
    [false, true, false, true, false, true],
    [false, true, false, true, true, false],
    [false, true, true, false, true, false],
];

const EAN13_QUIET: u8 = 9;
const EAN13_EDGE_GUARD: [u8; 3] = [1, 1, 1];
const EAN13_CENTER_GUARD: [u8; 5] = [1, 1, 1, 1, 1];

/// Symbol values 0..=105, six widths each (bar first), eleven modules wide.
const CODE128_PATTERNS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232",
];

const CODE128_START_B: u8 = 104;
const CODE128_STOP: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];
const CODE128_QUIET: u8 = 10;

/// Renders the linear formats it knows and reports the rest as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEncoder;

impl BarcodeEncoder for LinearEncoder {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError> {
        let runs = match symbology {
            Symbology::Ean13 => ean13_runs(&ean13_digits(text)?),
            Symbology::Code128 => code128_runs(&code128_values(text)?),
            other => return Err(EncodeError::Unsupported(other)),
        };
        render(&runs, size)
    }
}

/// Check digit over the first twelve digits.
pub fn ean13_check_digit(digits: &[u8; 12]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Parses 12 digits (check digit appended) or 13 digits (check digit verified).
pub fn ean13_digits(text: &str) -> Result<[u8; 13], EncodeError> {
    let parsed: Vec<u8> = text
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| EncodeError::InvalidContent("EAN-13 content must be digits".into()))?;

    let mut digits = [0u8; 13];
    match parsed.len() {
        12 => {
            digits[..12].copy_from_slice(&parsed);
        }
        13 => {
            digits.copy_from_slice(&parsed);
        }
        n => {
            return Err(EncodeError::InvalidContent(format!(
                "EAN-13 content must be 12 or 13 digits, got {}",
                n
            )))
        }
    }

    let mut body = [0u8; 12];
    body.copy_from_slice(&digits[..12]);
    let check = ean13_check_digit(&body);
    if parsed.len() == 13 && digits[12] != check {
        return Err(EncodeError::InvalidContent(format!(
            "EAN-13 check digit should be {}, got {}",
            check, digits[12]
        )));
    }
    digits[12] = check;
    Ok(digits)
}

fn ean13_runs(digits: &[u8; 13]) -> Vec<u8> {
    let parity = EAN13_PARITY[digits[0] as usize];
    let mut runs = Vec::with_capacity(61);

    runs.push(EAN13_QUIET);
    runs.extend_from_slice(&EAN13_EDGE_GUARD);
    for (i, &digit) in digits[1..7].iter().enumerate() {
        let set = if parity[i] { &EAN13_B } else { &EAN13_A };
        runs.extend_from_slice(&set[digit as usize]);
    }
    runs.extend_from_slice(&EAN13_CENTER_GUARD);
    for &digit in &digits[7..13] {
        runs.extend_from_slice(&EAN13_C[digit as usize]);
    }
    runs.extend_from_slice(&EAN13_EDGE_GUARD);
    runs.push(EAN13_QUIET);
    runs
}

/// Symbol values for `text` in code set B: start, data, checksum.
pub fn code128_values(text: &str) -> Result<Vec<u8>, EncodeError> {
    let mut values = Vec::with_capacity(text.len() + 2);
    values.push(CODE128_START_B);
    for (position, c) in text.chars().enumerate() {
        if !(' '..='~').contains(&c) {
            return Err(EncodeError::InvalidContent(format!(
                "CODE_128 cannot encode {:?} at position {}",
                c, position
            )));
        }
        values.push(c as u8 - b' ');
    }

    let checksum = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v as u32 * (i as u32).max(1))
        .sum::<u32>()
        % 103;
    values.push(checksum as u8);
    Ok(values)
}

fn code128_runs(values: &[u8]) -> Vec<u8> {
    let mut runs = Vec::with_capacity(values.len() * 6 + 9);
    runs.push(CODE128_QUIET);
    for &value in values {
        runs.extend(
            CODE128_PATTERNS[value as usize]
                .bytes()
                .map(|b| b - b'0'),
        );
    }
    runs.extend_from_slice(&CODE128_STOP);
    runs.push(CODE128_QUIET);
    runs
}

/// Draws alternating white/black runs scaled to the canvas.
///
/// The canvas grows when the symbol needs more than one pixel per module
/// than the requested width allows.
fn render(runs: &[u8], size: CanvasSize) -> Result<GrayImage, EncodeError> {
    let modules: u32 = runs.iter().map(|&r| r as u32).sum();
    if modules == 0 || size.height == 0 {
        return Err(EncodeError::Internal("empty symbol or canvas".into()));
    }

    let unit = (size.width / modules).max(1);
    let width = size.width.max(modules * unit);
    let offset = (width - modules * unit) / 2;

    let mut columns = vec![false; width as usize];
    let mut x = offset as usize;
    for (i, &run) in runs.iter().enumerate() {
        let black = i % 2 == 1;
        let span = run as usize * unit as usize;
        if black {
            columns[x..x + span].fill(true);
        }
        x += span;
    }

    Ok(GrayImage::from_fn(width, size.height, |x, _| {
        Luma([if columns[x as usize] { 0 } else { 255 }])
    }))
}
