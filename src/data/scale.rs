//! Min-max scaling of numeric columns
use super::sniff::{coerce_real, distinct_values, is_numeric_column};
use super::Datum;
use log::debug;

/// Map numeric column `j` linearly onto [0, 1].
///
/// The column minimum maps to 0 and the maximum to 1; every cell becomes a
/// `Datum::Real`. Columns that [`is_numeric_column`] rejects are left as they
/// are, and `false` is returned.
///
/// # Example
///
/// ```rust
/// # use nbmix::data::{scale_column, Datum};
/// let mut rows: Vec<Vec<Datum>> = (0..=20)
///     .map(|i| vec![Datum::from((i * 5).to_string()), Datum::from("x")])
///     .collect();
///
/// assert!(scale_column(&mut rows, 0));
/// assert!(!scale_column(&mut rows, 1));
///
/// assert_eq!(rows[0][0], Datum::Real(0.0));
/// assert_eq!(rows[10][0], Datum::Real(0.5));
/// assert_eq!(rows[20][0], Datum::Real(1.0));
/// assert_eq!(rows[20][1], Datum::from("x"));
/// ```
pub fn scale_column(rows: &mut [Vec<Datum>], j: usize) -> bool {
    if !is_numeric_column(&distinct_values(rows, j)) {
        return false;
    }

    let xs: Vec<f64> = rows.iter().filter_map(|row| coerce_real(&row[j])).collect();
    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let span = max - min;

    debug!("scaling column {j}: min = {min}, max = {max}");

    rows.iter_mut().zip(xs).for_each(|(row, x)| {
        let scaled = if span > 0.0 { (x - min) / span } else { 0.0 };
        row[j] = Datum::Real(scaled);
    });

    true
}

/// Scale every numeric column of `rows`. Returns the indices of the columns
/// that were scaled.
pub fn scale(rows: &mut [Vec<Datum>]) -> Vec<usize> {
    let n_cols = rows.first().map_or(0, |row| row.len());
    (0..n_cols).filter(|&j| scale_column(rows, j)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn scaled_column_spans_unit_interval() {
        let mut rows: Vec<Vec<Datum>> =
            (0..15).map(|i| vec![Datum::Real(3.0 * i as f64 - 7.0)]).collect();

        assert_eq!(scale(&mut rows), vec![0]);

        let xs: Vec<f64> =
            rows.iter().map(|row| row[0].as_real().unwrap()).collect();
        assert::close(xs[0], 0.0, TOL);
        assert::close(xs[14], 1.0, TOL);
        assert!(xs.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert::close(xs[7], 0.5, TOL);
    }

    #[test]
    fn categorical_columns_are_untouched() {
        let mut rows: Vec<Vec<Datum>> =
            (0..5).map(|i| vec![Datum::from(i.to_string())]).collect();
        let before = rows.clone();

        assert!(scale(&mut rows).is_empty());
        assert_eq!(rows, before);
    }
}
