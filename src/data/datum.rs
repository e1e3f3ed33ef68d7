#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

/// A single cell of a table: either a real number or a category label.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Datum {
    Real(f64),
    Category(String),
}

impl Datum {
    /// The value as an `f64` if this is a `Real`
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Datum::Real(x) => Some(*x),
            Datum::Category(_) => None,
        }
    }

    /// The label if this is a `Category`
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Datum::Category(s) => Some(s.as_str()),
            Datum::Real(_) => None,
        }
    }

    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Datum::Real(_) => "real",
            Datum::Category(_) => "category",
        }
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Datum::Real(_))
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Real(x) => write!(f, "{}", x),
            Datum::Category(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Datum {
    fn from(x: f64) -> Self {
        Datum::Real(x)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Category(String::from(s))
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Category(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(Datum::Real(1.5).to_string(), "1.5");
        assert_eq!(Datum::from("abc").to_string(), "abc");
    }

    #[test]
    fn accessors() {
        let x = Datum::from(2.0);
        assert_eq!(x.as_real(), Some(2.0));
        assert_eq!(x.as_category(), None);
        assert_eq!(x.kind(), "real");

        let y = Datum::from(String::from("b"));
        assert_eq!(y.as_real(), None);
        assert_eq!(y.as_category(), Some("b"));
        assert!(!y.is_real());
    }
}
