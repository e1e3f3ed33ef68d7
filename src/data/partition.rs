#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::vec_to_string;
use rand::Rng;
use std::fmt;

/// A hard assignment of n items to k clusters, by index.
///
/// Unlike a canonical partition, the number of clusters is fixed up front and
/// clusters are allowed to be empty.
///
/// # Example
/// ```rust
/// use nbmix::data::Partition;
///
/// let part = Partition::from_z(vec![0, 0, 2, 2, 2], 4).unwrap();
/// assert_eq!(part.z(), &[0, 0, 2, 2, 2]);
/// assert_eq!(part.counts(), &[2, 0, 3, 0]);
/// assert_eq!(part.members(), vec![vec![0, 1], vec![], vec![2, 3, 4], vec![]]);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Partition {
    /// The assignment of the n items to clusters 0, ..., k-1
    z: Vec<usize>,
    /// The number of items assigned to each cluster
    counts: Vec<usize>,
}

impl From<&Partition> for String {
    fn from(part: &Partition) -> String {
        let mut out = String::new();
        out.push_str(
            format!("Partition (n: {}, k: {})\n", part.len(), part.k())
                .as_str(),
        );
        out.push_str(
            format!("  assignment: {}\n", vec_to_string(&part.z, 15)).as_str(),
        );
        out.push_str(
            format!("  counts: {}\n", vec_to_string(&part.counts, part.k()))
                .as_str(),
        );
        out
    }
}

impl_display!(Partition);

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum PartitionError {
    /// A partition needs at least one cluster
    ZeroClusters,
    /// One or more of the indicators exceeds the number of clusters
    IndicatorOutOfRange {
        /// The indicator
        zi: usize,
        /// The number of clusters
        k: usize,
    },
}

impl std::error::Error for PartitionError {}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClusters => {
                write!(f, "a partition requires at least one cluster")
            }
            Self::IndicatorOutOfRange { zi, k } => {
                write!(
                    f,
                    "assignment z = {zi} is out of range for a partition \
                     with {k} clusters"
                )
            }
        }
    }
}

impl Partition {
    /// Partition of zero items into `k` clusters
    pub fn new(k: usize) -> Result<Self, PartitionError> {
        if k == 0 {
            Err(PartitionError::ZeroClusters)
        } else {
            Ok(Partition {
                z: vec![],
                counts: vec![0; k],
            })
        }
    }

    /// Create a `Partition` over `k` clusters with a given assignment, `z`
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nbmix::data::Partition;
    /// let part = Partition::from_z(vec![0, 1, 2, 1], 3).unwrap();
    /// assert_eq!(*part.counts(), vec![1, 2, 1]);
    ///
    /// assert!(Partition::from_z(vec![0, 3], 3).is_err());
    /// ```
    pub fn from_z(z: Vec<usize>, k: usize) -> Result<Self, PartitionError> {
        let mut part = Partition::new(k)?;
        z.iter().try_for_each(|&zi| part.push(zi))?;
        Ok(part)
    }

    /// Assign each of `n` items to a uniformly random cluster
    pub fn random<R: Rng>(
        n: usize,
        k: usize,
        rng: &mut R,
    ) -> Result<Self, PartitionError> {
        let mut part = Partition::new(k)?;
        part.z.reserve(n);
        (0..n).for_each(|_| {
            let zi = rng.gen_range(0..k);
            part.z.push(zi);
            part.counts[zi] += 1;
        });
        Ok(part)
    }

    #[must_use]
    pub fn z(&self) -> &Vec<usize> {
        &self.z
    }

    #[must_use]
    pub fn counts(&self) -> &Vec<usize> {
        &self.counts
    }

    /// Append a new item assigned to cluster `zi`
    pub fn push(&mut self, zi: usize) -> Result<(), PartitionError> {
        let k = self.k();
        if zi >= k {
            Err(PartitionError::IndicatorOutOfRange { zi, k })
        } else {
            self.z.push(zi);
            self.counts[zi] += 1;
            Ok(())
        }
    }

    /// Move item `ix` to cluster `zi`. Returns `true` if the assignment
    /// changed.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nbmix::data::Partition;
    /// let mut part = Partition::from_z(vec![0, 1, 0], 2).unwrap();
    ///
    /// assert!(part.reassign(0, 1).unwrap());
    /// assert!(!part.reassign(1, 1).unwrap());
    /// assert_eq!(*part.counts(), vec![1, 2]);
    /// ```
    pub fn reassign(
        &mut self,
        ix: usize,
        zi: usize,
    ) -> Result<bool, PartitionError> {
        let k = self.k();
        if zi >= k {
            return Err(PartitionError::IndicatorOutOfRange { zi, k });
        }
        let old = self.z[ix];
        if old == zi {
            Ok(false)
        } else {
            self.counts[old] -= 1;
            self.counts[zi] += 1;
            self.z[ix] = zi;
            Ok(true)
        }
    }

    /// Returns the number of clusters, k.
    #[must_use]
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Returns the number items
    #[must_use]
    pub fn len(&self) -> usize {
        self.z.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cluster weights (normalized counts)
    ///
    /// # Example
    ///
    /// ``` rust
    /// # use nbmix::data::Partition;
    /// let part = Partition::from_z(vec![0, 1, 0, 2], 4).unwrap();
    /// let weights = part.weights();
    ///
    /// assert_eq!(weights, vec![0.5, 0.25, 0.25, 0.0]);
    /// ```
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        let n = self.len() as f64;
        self.counts.iter().map(|&ct| (ct as f64) / n).collect()
    }

    /// The item indices in each cluster, in increasing order
    #[must_use]
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members: Vec<Vec<usize>> = self
            .counts
            .iter()
            .map(|&ct| Vec::with_capacity(ct))
            .collect();
        self.z
            .iter()
            .enumerate()
            .for_each(|(ix, &zi)| members[zi].push(ix));
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn new() {
        let part = Partition::from_z(vec![0, 1, 0, 2], 3).unwrap();

        assert_eq!(part.k(), 3);
        assert_eq!(part.counts, vec![2, 1, 1]);
    }

    #[test]
    fn zero_clusters_is_an_error() {
        assert_eq!(Partition::new(0), Err(PartitionError::ZeroClusters));
    }

    #[test]
    fn random_counts_match_assignment() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let part = Partition::random(200, 4, &mut rng).unwrap();

        assert_eq!(part.len(), 200);
        assert_eq!(part.counts().iter().sum::<usize>(), 200);
        assert!(part.z().iter().all(|&zi| zi < 4));
        (0..4).for_each(|k| {
            let ct = part.z().iter().filter(|&&zi| zi == k).count();
            assert_eq!(ct, part.counts()[k]);
        });
    }

    #[test]
    fn reassign_out_of_range_is_an_error() {
        let mut part = Partition::from_z(vec![0, 1], 2).unwrap();
        assert_eq!(
            part.reassign(0, 2),
            Err(PartitionError::IndicatorOutOfRange { zi: 2, k: 2 })
        );
        assert_eq!(*part.z(), vec![0, 1]);
    }

    #[test]
    fn members_cover_every_index_once() {
        let part = Partition::from_z(vec![2, 0, 2, 1, 0], 3).unwrap();
        let members = part.members();
        assert_eq!(members, vec![vec![1, 4], vec![3], vec![0, 2]]);
    }
}
