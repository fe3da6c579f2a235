//! Positional appendix labels.
//!
//! Positions map to letters in bijective base-26, so the sequence continues
//! past `Z` as `AA`, `AB`, ... `ZZ`, `AAA` instead of running out.

/// Prefix shared by every default label.
pub const LABEL_PREFIX: &str = "Appendix";

/// Letter code for a zero-based position (`0 -> "A"`, `26 -> "AA"`).
pub fn letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'A' + (remaining % 26) as u8));
        remaining /= 26;
    }
    letters.iter().rev().collect()
}

/// Default label for a zero-based position, e.g. `"Appendix C"`.
pub fn default_label(index: usize) -> String {
    format!("{LABEL_PREFIX} {}", letter(index))
}

/// Inverse of [`letter`]. Accepts either case; `None` for anything that is
/// not a run of ASCII letters.
pub fn index_from_letter(code: &str) -> Option<usize> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let mut value = 0usize;
    for ch in code.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value - 1)
}
