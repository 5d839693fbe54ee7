pub const DELIMITER: u8 = b';';

/// Splits `line` at the first `;` into the key and its parsed value.
///
/// Returns `None` for a line without a delimiter or whose value does not
/// start with a decimal number (sign, digits, fraction, exponent). Leading
/// whitespace is the C `isspace` set, including `\x0b` and `\x0c`, and
/// anything after the longest numeric prefix is ignored. `nan`, `inf` and
/// literals that overflow to infinity are rejected.
#[inline]
pub fn parse_record(line: &[u8]) -> Option<(&[u8], f64)> {
    let semicolon = line.iter().position(|&b| b == DELIMITER)?;
    let key = &line[..semicolon];
    let value = parse_value(&line[semicolon + 1..])?;
    Some((key, value))
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

#[inline]
fn parse_value(token: &[u8]) -> Option<f64> {
    let start = token.iter().position(|&b| !is_space(b))?;
    let token = &token[start..];
    if !matches!(token[0], b'+' | b'-' | b'.' | b'0'..=b'9') {
        return None;
    }
    match fast_float::parse_partial::<f64, _>(token) {
        Ok((value, consumed)) if consumed > 0 && value.is_finite() => Some(value),
        _ => None,
    }
}
