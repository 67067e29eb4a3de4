//! Cleaning and checking of decoded barcode symbols.

/// Cleans a raw decoded symbol, returning `None` when nothing is left.
///
/// Surrounding whitespace is trimmed and any hyphens or inner spaces are removed so that
/// `978-0-441-01359-3` and `9780441013593` are the same symbol.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let symbol = raw
        .trim()
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<String>();

    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

/// Returns true if `symbol` is an ISBN-10 or an ISBN-13 (EAN-13) with a correct check digit.
#[must_use]
pub fn is_valid_isbn(symbol: &str) -> bool {
    match symbol.len() {
        10 => is_valid_isbn10(symbol),
        13 => is_valid_isbn13(symbol),
        _ => false,
    }
}

fn is_valid_isbn10(symbol: &str) -> bool {
    let mut sum = 0;
    // weights run 10 down to 1, only the check digit may be an X
    for (weight, c) in (1..=10).rev().zip(symbol.chars()) {
        let value = match c {
            'X' | 'x' if weight == 1 => 10,
            c => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += value * weight;
    }
    sum % 11 == 0
}

fn is_valid_isbn13(symbol: &str) -> bool {
    let mut sum = 0;
    for (i, c) in symbol.chars().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { d } else { d * 3 };
    }
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::{is_valid_isbn, normalize};

    #[test]
    fn normalize_strips_hyphens_and_whitespace() {
        assert_eq!(
            Some("9780441013593".to_owned()),
            normalize("  978-0-441-01359-3\r")
        );
        assert_eq!(Some("0441013597".to_owned()), normalize("0 441 01359 7"));
    }

    #[test]
    fn normalize_empty_is_none() {
        assert_eq!(None, normalize(""));
        assert_eq!(None, normalize(" \t"));
        assert_eq!(None, normalize("--"));
    }

    #[test]
    fn isbn_13_check_digit() {
        assert!(is_valid_isbn("9780441013593"));
        assert!(!is_valid_isbn("9780441013594"));
        assert!(!is_valid_isbn("97804410135a3"));
    }

    #[test]
    fn isbn_10_check_digit() {
        assert!(is_valid_isbn("0441013597"));
        assert!(is_valid_isbn("080442957X"));
        assert!(!is_valid_isbn("0441013598"));
        assert!(!is_valid_isbn("X441013597"));
    }

    #[test]
    fn other_lengths_are_invalid() {
        assert!(!is_valid_isbn("12345"));
        assert!(!is_valid_isbn(""));
    }
}
