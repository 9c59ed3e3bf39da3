//! Character classes used by the tokenizer.

/// Check if `rune` is a digit in `base` (2, 8, 10 or 16).
pub fn is_digit(rune: char, base: u32) -> bool {
    match rune {
        '0' | '1' => true,
        '2'..='7' => base >= 8,
        '8' | '9' => base >= 10,
        'a'..='f' | 'A'..='F' => base >= 16,
        _ => false,
    }
}

/// Check if `rune` can start an identifier.
///
/// Every non-ASCII code point counts as a letter.
pub fn is_identifier_start(rune: char) -> bool {
    rune == '_' || rune == '$' || rune.is_ascii_alphabetic() || !rune.is_ascii()
}

/// Check if `rune` can continue an identifier.
pub fn is_identifier_continue(rune: char) -> bool {
    is_identifier_start(rune) || is_digit(rune, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_by_base() {
        assert!(is_digit('1', 2));
        assert!(!is_digit('2', 2));
        assert!(is_digit('7', 8));
        assert!(!is_digit('8', 8));
        assert!(is_digit('9', 10));
        assert!(!is_digit('a', 10));
        assert!(is_digit('f', 16));
        assert!(is_digit('F', 16));
        assert!(!is_digit('g', 16));
        assert!(!is_digit('.', 16));
    }

    #[test]
    fn test_identifier_start() {
        for rune in ['_', '$', 'a', 'Z', 'é', 'λ', '日'] {
            assert!(is_identifier_start(rune), "{rune:?}");
        }
        for rune in ['0', '9', '-', ' ', '"', '@'] {
            assert!(!is_identifier_start(rune), "{rune:?}");
        }
    }

    #[test]
    fn test_identifier_continue() {
        assert!(is_identifier_continue('0'));
        assert!(is_identifier_continue('x'));
        assert!(!is_identifier_continue('.'));
        assert!(!is_identifier_continue('\u{7f}'));
    }
}
