use crate::error::SpecError;

/// 10 digits — the historical default set.
pub const CHARSET_DIGITS: &str = "0123456789";

/// 10 caractères — compact, bon contraste.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// 70 caractères — Paul Bourke extended, bon équilibre.
pub const CHARSET_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// A parsed `add`/`remove` argument: one character, a range, or a keyword.
///
/// # Example
/// ```
/// use gg_core::charset::CharSpec;
/// let spec: CharSpec = "a-d".parse().unwrap();
/// assert_eq!(spec.expand(), vec!['a', 'b', 'c', 'd']);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharSpec {
    /// A single character.
    Single(char),
    /// An inclusive codepoint range (always stored low..=high).
    Range(char, char),
    /// Every printable ASCII character, `' '` through `'~'`.
    All,
}

impl CharSpec {
    /// Expands the spec into the characters it denotes, in codepoint order.
    #[must_use]
    pub fn expand(self) -> Vec<char> {
        match self {
            Self::Single(c) => vec![c],
            Self::Range(lo, hi) => (lo..=hi).collect(),
            Self::All => (' '..='~').collect(),
        }
    }
}

impl std::str::FromStr for CharSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            // A bare "-" is the dash character, not an empty range.
            [c] => Ok(Self::Single(*c)),
            _ if s == "all" => Ok(Self::All),
            _ if s == "space" => Ok(Self::Single(' ')),
            [a, '-', b] => {
                let (lo, hi) = if a <= b { (*a, *b) } else { (*b, *a) };
                Ok(Self::Range(lo, hi))
            }
            _ => Err(SpecError::Malformed(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_and_dash() {
        assert_eq!("x".parse::<CharSpec>(), Ok(CharSpec::Single('x')));
        assert_eq!("-".parse::<CharSpec>(), Ok(CharSpec::Single('-')));
    }

    #[test]
    fn keywords() {
        assert_eq!("space".parse::<CharSpec>(), Ok(CharSpec::Single(' ')));
        let all = "all".parse::<CharSpec>().unwrap().expand();
        assert_eq!(all.len(), 95);
        assert_eq!(all.first(), Some(&' '));
        assert_eq!(all.last(), Some(&'~'));
    }

    #[test]
    fn range_normalizes_order() {
        assert_eq!("p-m".parse::<CharSpec>(), Ok(CharSpec::Range('m', 'p')));
        assert_eq!(
            "p-m".parse::<CharSpec>().unwrap().expand(),
            vec!['m', 'n', 'o', 'p']
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "abc", "a-", "-z", "a--z", "everything"] {
            assert!(bad.parse::<CharSpec>().is_err(), "accepted {bad:?}");
        }
    }
}
