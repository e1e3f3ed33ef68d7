#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::Datum;
use crate::mixture::MixtureError;
use std::collections::BTreeMap;

/// Rows of fixed-width feature vectors with a parallel label per row.
///
/// Labels are carried along for reporting only. Nothing in the model reads
/// them.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Dataset {
    pub rows: Vec<Vec<Datum>>,
    pub labels: Vec<String>,
}

impl Dataset {
    /// Rows labelled with their 1-based position
    pub fn new(rows: Vec<Vec<Datum>>) -> Self {
        let labels = (1..=rows.len()).map(|i| i.to_string()).collect();
        Dataset { rows, labels }
    }

    /// Build a dataset from `(cluster, row)` draws of a mixture. The label of
    /// each row is the id of the cluster that generated it.
    pub fn from_samples(samples: Vec<(usize, Vec<Datum>)>) -> Self {
        let (labels, rows) = samples
            .into_iter()
            .map(|(zi, row)| (zi.to_string(), row))
            .unzip();
        Dataset { rows, labels }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the first row, or zero for an empty dataset
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Remove the columns at `ignore` from every row. Indices past the end
    /// of a row are skipped.
    pub fn drop_columns(&mut self, ignore: &[usize]) {
        if ignore.is_empty() {
            return;
        }
        self.rows.iter_mut().for_each(|row| {
            let mut j = 0;
            row.retain(|_| {
                let keep = !ignore.contains(&j);
                j += 1;
                keep
            });
        });
    }

    /// The common row width, or the first row that disagrees with row 0
    pub fn check_width(&self) -> Result<usize, MixtureError> {
        let n = self.width();
        match self.rows.iter().position(|row| row.len() != n) {
            Some(row) => Err(MixtureError::InvalidRowWidth {
                row,
                expected: n,
                found: self.rows[row].len(),
            }),
            None => Ok(n),
        }
    }

    /// Count the labels falling in each cluster of `members` (as returned by
    /// `MixtureModel::clustering`).
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nbmix::data::{Dataset, Datum};
    /// let data = Dataset {
    ///     rows: vec![vec![Datum::Real(0.0)]; 3],
    ///     labels: vec!["x".into(), "y".into(), "x".into()],
    /// };
    /// let tallies = data.tally_labels(&[vec![0, 2], vec![1]]);
    ///
    /// assert_eq!(tallies[0]["x"], 2);
    /// assert_eq!(tallies[1]["y"], 1);
    /// ```
    pub fn tally_labels(
        &self,
        members: &[Vec<usize>],
    ) -> Vec<BTreeMap<String, usize>> {
        members
            .iter()
            .map(|ixs| {
                ixs.iter().fold(BTreeMap::new(), |mut acc, &ix| {
                    *acc.entry(self.labels[ix].clone()).or_insert(0) += 1;
                    acc
                })
            })
            .collect()
    }
}
