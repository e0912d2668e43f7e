use crate::error::GenerateError;
use crate::record::Symbology;

/// Accepted EAN-13 input lengths: without or with the check digit.
pub const EAN13_LENGTHS: [usize; 2] = [12, 13];

/// Checks `text` against the input rules of `symbology` before encoding.
///
/// Every format rejects empty input. EAN-13 additionally needs 12 or 13
/// ASCII digits; length is checked before the alphabet so that a short
/// alphanumeric input is reported as a length problem.
pub fn validate(text: &str, symbology: Symbology) -> Result<(), GenerateError> {
    if text.is_empty() {
        return Err(GenerateError::EmptyInput);
    }

    if symbology == Symbology::Ean13 {
        validate_ean13(text)?;
    }

    Ok(())
}

fn validate_ean13(text: &str) -> Result<(), GenerateError> {
    let length = text.chars().count();
    if !EAN13_LENGTHS.contains(&length) {
        return Err(GenerateError::Ean13WrongLength { length });
    }

    if let Some((position, character)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(GenerateError::Ean13NonDigit {
            character,
            position,
        });
    }

    Ok(())
}
