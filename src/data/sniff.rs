//! Column type inference for raw tables
use super::Datum;
use itertools::Itertools;

/// A column must have strictly more distinct values than this to be treated
/// as numeric. Few-valued numeric codes (ratings, flags, small counts) are
/// modelled as categories.
pub const NUMERIC_MIN_DISTINCT: usize = 10;

/// Returns `true` if `s` is a plain decimal number: an optional sign,
/// digits, and an optional fractional part (`"3"`, `"-2.5"`, `"+.5"`, `"7."`).
///
/// # Example
///
/// ```rust
/// # use nbmix::data::is_numeric_token;
/// assert!(is_numeric_token("-12.25"));
/// assert!(is_numeric_token(".5"));
/// assert!(!is_numeric_token("1e3"));
/// assert!(!is_numeric_token("NaN"));
/// assert!(!is_numeric_token("-"));
/// ```
pub fn is_numeric_token(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int, frac) = match body.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (body, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => {
            (!int.is_empty() || !frac.is_empty())
                && all_digits(int)
                && all_digits(frac)
        }
    }
}

fn is_numeric_datum(x: &Datum) -> bool {
    match x {
        Datum::Real(x) => x.is_finite(),
        Datum::Category(s) => is_numeric_token(s.trim()),
    }
}

/// Decide whether a column with the given distinct values is continuous.
///
/// True only when there are more than [`NUMERIC_MIN_DISTINCT`] distinct
/// values and every one of them is numeric.
///
/// # Example
///
/// ```rust
/// # use nbmix::data::{is_numeric_column, Datum};
/// let ten: Vec<Datum> = (0..10).map(|i| Datum::from(i.to_string())).collect();
/// let eleven: Vec<Datum> = (0..11).map(|i| Datum::from(i.to_string())).collect();
///
/// assert!(!is_numeric_column(&ten));
/// assert!(is_numeric_column(&eleven));
/// ```
pub fn is_numeric_column(distinct: &[Datum]) -> bool {
    distinct.len() > NUMERIC_MIN_DISTINCT && distinct.iter().all(is_numeric_datum)
}

/// Distinct values of column `j`, in order of first appearance
pub fn distinct_values(rows: &[Vec<Datum>], j: usize) -> Vec<Datum> {
    rows.iter()
        .map(|row| &row[j])
        .unique_by(|x| x.to_string())
        .cloned()
        .collect()
}

/// Parse a value already known to be numeric into `Datum::Real`
pub(crate) fn coerce_real(x: &Datum) -> Option<f64> {
    match x {
        Datum::Real(x) => Some(*x),
        Datum::Category(s) => s.trim().parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(xs: &[&str]) -> Vec<Datum> {
        xs.iter().map(|&s| Datum::from(s)).collect()
    }

    #[test]
    fn numeric_tokens() {
        for s in ["0", "12", "-3", "+4", "1.25", "-0.5", ".75", "8."] {
            assert!(is_numeric_token(s), "{s} should be numeric");
        }
        for s in ["", ".", "+", "a1", "1a", "1.2.3", "1e5", "inf", "--1"] {
            assert!(!is_numeric_token(s), "{s} should not be numeric");
        }
    }

    #[test]
    fn ten_distinct_numbers_are_categorical() {
        let xs: Vec<String> = (0..10).map(|i| format!("{}.5", i)).collect();
        let col: Vec<Datum> =
            xs.iter().map(|s| Datum::from(s.as_str())).collect();
        assert!(!is_numeric_column(&col));
    }

    #[test]
    fn eleven_distinct_numbers_are_numeric() {
        let col: Vec<Datum> = (0..11).map(|i| Datum::Real(i as f64)).collect();
        assert!(is_numeric_column(&col));
    }

    #[test]
    fn any_non_numeric_value_makes_column_categorical() {
        let mut col: Vec<Datum> =
            (0..20).map(|i| Datum::from(i.to_string())).collect();
        col.push(Datum::from("n/a"));
        assert!(!is_numeric_column(&col));
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let rows: Vec<Vec<Datum>> = ["b", "a", "b", "c", "a"]
            .iter()
            .map(|&s| column(&[s]))
            .collect();
        assert_eq!(distinct_values(&rows, 0), column(&["b", "a", "c"]));
    }

    #[test]
    fn coerce_real_parses_padded_tokens() {
        assert_eq!(coerce_real(&Datum::from(" 2.5 ")), Some(2.5));
        assert_eq!(coerce_real(&Datum::Real(1.0)), Some(1.0));
        assert_eq!(coerce_real(&Datum::from("x")), None);
    }
}
