use crate::coord::Face;
use crate::error::S2CellError;
use crate::index::constants::{FACE_BITS, MAX_LEVEL, MAX_TOKEN_LEN};
use crate::index::hilbert::{cell_grid, truncate_position};

/// Fully validated cell fields produced by the string parsers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParsedCell {
    pub(crate) face: Face,
    pub(crate) i: u32,
    pub(crate) j: u32,
    pub(crate) level: u8,
}

/// Checks a level is within 1-30.
pub(crate) fn validate_level(level: u32) -> Result<u8, S2CellError> {
    if level == 0 || level > u32::from(MAX_LEVEL) {
        return Err(S2CellError::InvalidLevel(level.to_string()));
    }
    Ok(level as u8)
}

/// Checks i and j fit the grid of a (validated) level.
pub(crate) fn validate_grid(i: u32, j: u32, level: u8) -> Result<(), S2CellError> {
    let max = (1u64 << level) - 1;
    if u64::from(i) > max || u64::from(j) > max {
        return Err(S2CellError::InvalidConstructionArguments(format!(
            "i/j ({}, {}) outside [0, {}] at level {}",
            i, j, max, level
        )));
    }
    Ok(())
}

fn parse_face_char(face: u8, context: &str) -> Result<Face, S2CellError> {
    if !face.is_ascii_digit() {
        return Err(S2CellError::MalformedToken(context.to_string()));
    }
    Face::try_from(face - b'0')
}

/// Renders a level position as one base-4 digit per level.
pub(crate) fn position_to_digits(position: u64, level: u8) -> String {
    (0..u32::from(level))
        .rev()
        .map(|k| char::from(b'0' + ((position >> (2 * k)) & 0b11) as u8))
        .collect()
}

/// Reads base-4 digits back into a level position. The level is the digit count.
fn digits_to_position(digits: &str) -> Result<(u64, u8), S2CellError> {
    if digits.is_empty() {
        return Err(S2CellError::MalformedPositionString(
            "empty position".to_string(),
        ));
    }

    let position = digits.bytes().try_fold(0u64, |acc, b| match b {
        b'0'..=b'3' => Ok((acc << 2) | u64::from(b - b'0')),
        _ => Err(S2CellError::MalformedPositionString(digits.to_string())),
    });
    let level = validate_level(u32::try_from(digits.len()).unwrap_or(u32::MAX))?;

    Ok((position?, level))
}

fn parse_face_and_digits(
    face: u8,
    digits: &str,
    context: &str,
) -> Result<ParsedCell, S2CellError> {
    let face = parse_face_char(face, context)?;
    let (position, level) = digits_to_position(digits)?;
    let (i, j) = cell_grid(face.index(), position, level)?;

    Ok(ParsedCell { face, i, j, level })
}

/// Parses `F/PPPP…`, a face digit, a slash and 1-30 base-4 digits.
pub(crate) fn parse_standard_string(s: &str) -> Result<ParsedCell, S2CellError> {
    let (face, digits) = s
        .split_once('/')
        .ok_or_else(|| S2CellError::MalformedToken(s.to_string()))?;
    let &[face] = face.as_bytes() else {
        return Err(S2CellError::MalformedToken(s.to_string()));
    };
    parse_face_and_digits(face, digits, s)
}

/// Parses `FPPPP…`, the standard string without its slash.
pub(crate) fn parse_mysql_token(s: &str) -> Result<ParsedCell, S2CellError> {
    let Some((&face, _)) = s.as_bytes().split_first() else {
        return Err(S2CellError::MalformedToken(s.to_string()));
    };
    // Slicing fails when the first character is multi-byte.
    let digits = s.get(1..).ok_or_else(|| S2CellError::MalformedToken(s.to_string()))?;
    parse_face_and_digits(face, digits, s)
}

fn parse_decimal(field: &str, context: &str) -> Result<u32, S2CellError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(S2CellError::MalformedToken(context.to_string()));
    }
    field.parse::<u32>().map_err(|_| {
        S2CellError::InvalidConstructionArguments(format!("{} does not fit in 32 bits", field))
    })
}

/// Parses `F<face>ij[<i>,<j>]@<level>`.
pub(crate) fn parse_compact_string(s: &str) -> Result<ParsedCell, S2CellError> {
    let malformed = || S2CellError::MalformedToken(s.to_string());

    let rest = s.strip_prefix('F').ok_or_else(malformed)?;
    let (face, rest) = rest.split_once("ij[").ok_or_else(malformed)?;
    let (ij, level) = rest.split_once("]@").ok_or_else(malformed)?;
    let (i, j) = ij.split_once(',').ok_or_else(malformed)?;

    let &[face] = face.as_bytes() else {
        return Err(malformed());
    };
    let face = parse_face_char(face, s)?;

    if level.is_empty() || !level.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let level = validate_level(level.parse::<u32>().unwrap_or(u32::MAX))?;
    let i = parse_decimal(i, s)?;
    let j = parse_decimal(j, s)?;
    validate_grid(i, j, level)?;

    Ok(ParsedCell { face, i, j, level })
}

/// Renders `F<face>ij[<i>,<j>]@<level>`.
pub(crate) fn format_compact_string(face: Face, i: u32, j: u32, level: u8) -> String {
    format!("F{}ij[{},{}]@{}", face.index(), i, j, level)
}

/// Renders the hex token: 3 face bits, `2 * level` position bits, a `1` terminator,
/// then zero padding up to the next whole hex digit.
///
/// # Binary Format
///
/// | Bits          | Field       |
/// |---------------|-------------|
/// | 3             | Face (0-5)  |
/// | 2 * level     | Position    |
/// | 1             | Terminator  |
/// | 0-3           | Zero pad    |
pub(crate) fn format_hex_token(face: Face, position: u64, level: u8) -> String {
    let level_bits = 2 * u32::from(level);
    let width = FACE_BITS + level_bits + 1;
    let padding = (4 - width % 4) % 4;
    let digits = ((width + padding) / 4) as usize;

    let bits = (u64::from(face.index()) << (level_bits + 1)) | (position << 1) | 1;
    format!("{:0digits$x}", bits << padding)
}

/// Parses a hex token back into validated cell fields.
///
/// The terminator is the lowest set bit, which fixes the level from the token length.
///
/// # Errors
///
/// - [`S2CellError::MalformedToken`] - empty, longer than 16 digits, non-hex, or no
///   valid terminator
/// - [`S2CellError::InvalidLevel`] - the implied level is outside 1-30
/// - [`S2CellError::InvalidFace`] - the face bits exceed 5
pub(crate) fn parse_hex_token(token: &str) -> Result<ParsedCell, S2CellError> {
    let malformed = || S2CellError::MalformedToken(token.to_string());

    if token.is_empty()
        || token.len() > MAX_TOKEN_LEN
        || !token.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(malformed());
    }

    let value = u64::from_str_radix(token, 16).map_err(|_| malformed())?;
    if value == 0 {
        return Err(malformed());
    }

    let padding = value.trailing_zeros();
    if padding >= 4 {
        return Err(malformed());
    }

    let width = 4 * token.len() as u32 - padding - 1;
    if width < FACE_BITS || (width - FACE_BITS) % 2 != 0 {
        return Err(malformed());
    }
    let level = validate_level((width - FACE_BITS) / 2)?;

    let payload = value >> (padding + 1);
    let face = Face::try_from((payload >> (2 * u32::from(level))) as u8)?;
    let position = truncate_position(payload, level);
    let (i, j) = cell_grid(face.index(), position, level)?;

    Ok(ParsedCell { face, i, j, level })
}

/// Cheap shape checks used to pick a parser for an untagged string.
pub(crate) fn looks_like_standard_string(s: &str) -> bool {
    s.contains('/')
}

pub(crate) fn looks_like_compact_string(s: &str) -> bool {
    s.starts_with('F')
}

/// Matches `[2-9ab][0-9a-f]{1,15}`, ignoring case. Face 0 tokens start with `0`
/// or `1` and are only reachable through the explicit hex parser.
pub(crate) fn looks_like_hex_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    matches!(bytes.first(), Some(b'2'..=b'9' | b'a' | b'b' | b'A' | b'B'))
        && (2..=MAX_TOKEN_LEN).contains(&bytes.len())
        && bytes.iter().all(u8::is_ascii_hexdigit)
}

pub(crate) fn looks_like_mysql_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::hilbert::cell_position;

    #[test]
    fn test_validate_level() {
        assert_eq!(validate_level(1), Ok(1));
        assert_eq!(validate_level(30), Ok(30));
        assert!(matches!(validate_level(0), Err(S2CellError::InvalidLevel(_))));
        assert!(matches!(validate_level(31), Err(S2CellError::InvalidLevel(_))));
    }

    #[test]
    fn test_validate_grid() {
        assert!(validate_grid(1, 1, 1).is_ok());
        assert!(validate_grid(2, 0, 1).is_err());
        assert!(validate_grid((1 << 30) - 1, 0, 30).is_ok());
    }

    #[test]
    fn test_digits() -> Result<(), S2CellError> {
        assert_eq!(position_to_digits(0b10_01_11, 3), "213");
        assert_eq!(position_to_digits(0, 2), "00");
        assert_eq!(digits_to_position("213")?, (0b10_01_11, 3));
        Ok(())
    }

    #[test]
    fn test_digits_reject_bad_input() {
        assert!(matches!(
            digits_to_position(""),
            Err(S2CellError::MalformedPositionString(_))
        ));
        assert!(matches!(
            digits_to_position("0140"),
            Err(S2CellError::MalformedPositionString(_))
        ));
        assert!(matches!(
            digits_to_position(&"0".repeat(31)),
            Err(S2CellError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_standard_string_parse() -> Result<(), S2CellError> {
        let parsed = parse_standard_string("0/2")?;
        assert_eq!(
            parsed,
            ParsedCell {
                face: Face::PosX,
                i: 1,
                j: 1,
                level: 1
            }
        );
        assert_eq!(parse_mysql_token("02")?, parsed);
        Ok(())
    }

    #[test]
    fn test_standard_string_errors() {
        assert!(matches!(
            parse_standard_string("0/24"),
            Err(S2CellError::MalformedPositionString(_))
        ));
        assert_eq!(parse_standard_string("6/01"), Err(S2CellError::InvalidFace(6)));
        assert!(matches!(
            parse_standard_string("x/01"),
            Err(S2CellError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_standard_string("01/01"),
            Err(S2CellError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_standard_string("0123"),
            Err(S2CellError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_mysql_token_errors() {
        assert!(matches!(parse_mysql_token(""), Err(S2CellError::MalformedToken(_))));
        assert!(matches!(
            parse_mysql_token("1"),
            Err(S2CellError::MalformedPositionString(_))
        ));
        assert!(matches!(
            parse_mysql_token("é1"),
            Err(S2CellError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_compact_string() -> Result<(), S2CellError> {
        let parsed = parse_compact_string("F1ij[885539,851769]@20")?;
        assert_eq!(parsed.face, Face::PosY);
        assert_eq!((parsed.i, parsed.j, parsed.level), (885539, 851769, 20));
        assert_eq!(
            format_compact_string(parsed.face, parsed.i, parsed.j, parsed.level),
            "F1ij[885539,851769]@20"
        );
        Ok(())
    }

    #[test]
    fn test_compact_string_errors() {
        assert!(matches!(
            parse_compact_string("F1ij[1,1]@0"),
            Err(S2CellError::InvalidLevel(_))
        ));
        assert!(matches!(
            parse_compact_string("F1ij[1,1]@99999999999"),
            Err(S2CellError::InvalidLevel(_))
        ));
        assert_eq!(
            parse_compact_string("F7ij[1,1]@3"),
            Err(S2CellError::InvalidFace(7))
        );
        assert!(matches!(
            parse_compact_string("F1ij[8,1]@3"),
            Err(S2CellError::InvalidConstructionArguments(_))
        ));
        assert!(matches!(
            parse_compact_string("F1ij[-1,1]@3"),
            Err(S2CellError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_compact_string("F1ij[1,1]"),
            Err(S2CellError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_hex_token_layout() {
        // face 000, position 10, terminator 1, two bits of padding
        assert_eq!(format_hex_token(Face::PosX, 0b10, 1), "14");
        // face 000, position 1000, terminator 1
        assert_eq!(format_hex_token(Face::PosX, 0b1000, 2), "11");
        // face 101, no padding at level 30
        let token = format_hex_token(Face::NegZ, 0, 30);
        assert_eq!(token, "a000000000000001");
        assert_eq!(token.len(), MAX_TOKEN_LEN);
    }

    #[test]
    fn test_hex_token_round_trip() -> Result<(), S2CellError> {
        for face in Face::ALL {
            for level in 1..=MAX_LEVEL {
                let max = (1u32 << level) - 1;
                let (i, j) = (max / 3, max);
                let position = cell_position(face.index(), i, j, level);
                let token = format_hex_token(face, position, level);
                assert_eq!(token.len(), (2 * level as usize + 4).div_ceil(4));
                assert_eq!(parse_hex_token(&token)?, ParsedCell { face, i, j, level });
            }
        }
        Ok(())
    }

    #[test]
    fn test_hex_token_errors() {
        for token in ["", "zz", "0", "00", "10", "12345678901234567", "1g"] {
            assert!(
                matches!(parse_hex_token(token), Err(S2CellError::MalformedToken(_))),
                "{token}"
            );
        }
        // one hex digit carries no position bits
        assert!(matches!(parse_hex_token("1"), Err(S2CellError::InvalidLevel(_))));
        // face bits 110
        assert_eq!(parse_hex_token("c1"), Err(S2CellError::InvalidFace(6)));
    }

    #[test]
    fn test_shape_detection() {
        assert!(looks_like_standard_string("1/0"));
        assert!(looks_like_compact_string("F1ij[0,0]@1"));
        assert!(looks_like_hex_token("3467ff41799"));
        assert!(!looks_like_hex_token("1467ff41799"));
        assert!(!looks_like_hex_token("3"));
        assert!(looks_like_hex_token("3467FF41799"));
        assert!(looks_like_hex_token("B0"));
        assert!(!looks_like_hex_token("c0"));
        assert!(!looks_like_hex_token("3g"));
        assert!(looks_like_mysql_token("122030333332200233030"));
        assert!(!looks_like_mysql_token("12a"));
    }
}
