use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy selecting a neighboring brightness bucket when a queried value
/// falls strictly between two existing keys.
///
/// # Example
/// ```
/// use gg_core::rounding::RoundMethod;
/// assert_eq!("abs".parse::<RoundMethod>().unwrap(), RoundMethod::Nearest);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMethod {
    /// Always take the greatest key below the query.
    Lower,
    /// Always take the smallest key above the query.
    Higher,
    /// Take the numerically closer key; an exact tie resolves to the
    /// lower one.
    #[default]
    #[serde(alias = "abs")]
    Nearest,
}

impl FromStr for RoundMethod {
    type Err = String;

    /// Parses the session command vocabulary: `lower`, `higher`, `abs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(Self::Lower),
            "higher" => Ok(Self::Higher),
            "abs" => Ok(Self::Nearest),
            other => Err(format!("unknown rounding method: {other:?}")),
        }
    }
}

impl fmt::Display for RoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lower => "lower",
            Self::Higher => "higher",
            Self::Nearest => "abs",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_vocabulary() {
        assert_eq!("lower".parse::<RoundMethod>(), Ok(RoundMethod::Lower));
        assert_eq!("higher".parse::<RoundMethod>(), Ok(RoundMethod::Higher));
        assert_eq!("abs".parse::<RoundMethod>(), Ok(RoundMethod::Nearest));
        assert!("nearest-ish".parse::<RoundMethod>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for method in [RoundMethod::Lower, RoundMethod::Higher, RoundMethod::Nearest] {
            let parsed: RoundMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }
}
