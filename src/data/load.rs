//! Reading delimited text tables
use super::{Dataset, Datum};
use log::info;
use std::fmt;
use std::path::Path;

/// Characters that separate cells on a line
pub const DELIMITERS: [char; 3] = [',', ';', ':'];

#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read
    Io(std::io::Error),
    /// A line has a different number of cells than the first line
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The label column is past the end of a line
    LabelColumnOutOfRange { line: usize, col: usize, width: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read data: {}", err),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line} has {found} cells, expected {expected}"
            ),
            Self::LabelColumnOutOfRange { line, col, width } => write!(
                f,
                "label column {col} is out of range on line {line} \
                 ({width} cells)"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

/// Parse a table of cells separated by any of [`DELIMITERS`].
///
/// Every cell is read as a `Datum::Category`; column types are decided later
/// by [`is_numeric_column`](super::is_numeric_column). Blank lines are
/// skipped.
///
/// # Arguments
/// - label_col: column holding the ground-truth label. It is removed from
///   the row. Without it, rows are labelled by their 1-based position.
/// - ignore: columns to drop, indexed after the label column is removed.
///
/// # Example
///
/// ```rust
/// # use nbmix::data::{parse_delimited, Datum};
/// let text = "1.0,red;yes\n2.5,blue;no\n";
/// let data = parse_delimited(text, Some(2), &[]).unwrap();
///
/// assert_eq!(data.labels, vec!["yes", "no"]);
/// assert_eq!(data.rows[1], vec![Datum::from("2.5"), Datum::from("blue")]);
/// ```
pub fn parse_delimited(
    text: &str,
    label_col: Option<usize>,
    ignore: &[usize],
) -> Result<Dataset, LoadError> {
    let mut rows: Vec<Vec<Datum>> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut expected: Option<usize> = None;

    for (ix, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = ix + 1;
        let mut cells: Vec<&str> = line.split(DELIMITERS).collect();

        match expected {
            Some(width) if width != cells.len() => {
                return Err(LoadError::RaggedRow {
                    line: line_no,
                    expected: width,
                    found: cells.len(),
                });
            }
            None => expected = Some(cells.len()),
            _ => (),
        }

        let label = match label_col {
            Some(col) if col < cells.len() => cells.remove(col).to_string(),
            Some(col) => {
                return Err(LoadError::LabelColumnOutOfRange {
                    line: line_no,
                    col,
                    width: cells.len(),
                });
            }
            None => (rows.len() + 1).to_string(),
        };

        let row = cells
            .iter()
            .enumerate()
            .filter(|(j, _)| !ignore.contains(j))
            .map(|(_, &cell)| Datum::from(cell))
            .collect();

        rows.push(row);
        labels.push(label);
    }

    Ok(Dataset { rows, labels })
}

/// Read and parse a delimited text file. See [`parse_delimited`].
pub fn load_file<P: AsRef<Path>>(
    path: P,
    label_col: Option<usize>,
    ignore: &[usize],
) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let data = parse_delimited(&text, label_col, ignore)?;
    info!(
        "loaded {} rows x {} columns from {}",
        data.len(),
        data.width(),
        path.as_ref().display()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn rows_without_label_column_get_positional_labels() {
        let text = indoc! {"
            a,1
            b,2

            c,3
        "};
        let data = parse_delimited(text, None, &[]).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.labels, vec!["1", "2", "3"]);
        assert_eq!(data.rows[2], vec![Datum::from("c"), Datum::from("3")]);
    }

    #[test]
    fn ignored_columns_are_dropped_after_label_removal() {
        let text = "lbl,x,y,z\nlbl2,u,v,w";
        let data = parse_delimited(text, Some(0), &[1]).unwrap();
        assert_eq!(data.labels, vec!["lbl", "lbl2"]);
        assert_eq!(data.rows[0], vec![Datum::from("x"), Datum::from("z")]);
        assert_eq!(data.width(), 2);
    }

    #[test]
    fn mixed_delimiters_split_alike() {
        let data = parse_delimited("1,2;3:4", None, &[]).unwrap();
        assert_eq!(data.width(), 4);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = parse_delimited("1,2\n1,2,3", None, &[]);
        assert!(matches!(
            res,
            Err(LoadError::RaggedRow {
                line: 2,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn label_column_out_of_range() {
        let res = parse_delimited("1,2", Some(5), &[]);
        assert!(matches!(
            res,
            Err(LoadError::LabelColumnOutOfRange { col: 5, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = load_file("/definitely/not/here.csv", None, &[]);
        assert!(matches!(res, Err(LoadError::Io(_))));
    }
}
