//! Naive-Bayes mixture over mixed categorical and continuous features
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

mod error;
mod learn;

pub use error::MixtureError;
pub use learn::MAX_PASSES;

use crate::data::{coerce_real, distinct_values, is_numeric_column};
use crate::data::{Datum, Partition};
use crate::dist::{Categorical, ComponentError, Distribution, Gaussian};
use crate::misc::{pflip, random_weights};
use crate::traits::Component;
use log::debug;
use rand::Rng;
use std::fmt;

/// Labels used by categorical features of synthetic models
pub const DEMO_ALPHABET: [&str; 3] = ["a", "b", "c"];

/// Tolerance on the sum of the mixing weights
const WEIGHT_SUM_TOL: f64 = 1E-9;

/// A mixture of `k` clusters over `n` independent features.
///
/// Each cluster owns one [`Distribution`] per feature, so the model is a
/// fixed k × n grid of components plus a length-k vector of mixing weights.
/// The grid is stored flat, cluster-major.
///
/// # Example
///
/// ```
/// use nbmix::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0x1234);
///
/// let mut rows: Vec<Vec<Datum>> = (0..40)
///     .map(|i| {
///         let x = if i % 2 == 0 { 0.0 } else { 10.0 } + (i as f64) * 0.01;
///         vec![Datum::from(x.to_string())]
///     })
///     .collect();
///
/// let mut mm = MixtureModel::from_data(2, &mut rows, &mut rng).unwrap();
/// mm.learn(&rows, &mut rng).unwrap();
///
/// let partition = mm.clustering(&rows).unwrap();
/// assert_eq!(partition.len(), 2);
/// assert_eq!(partition.iter().map(|ixs| ixs.len()).sum::<usize>(), 40);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct MixtureModel {
    /// Number of clusters
    k: usize,
    /// Number of features
    n: usize,
    /// Mixing weights, one per cluster
    weights: Vec<f64>,
    /// `components[zi * n + j]` models feature `j` in cluster `zi`
    components: Vec<Distribution>,
}

/// Display summary of one cluster
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct ClusterDescription {
    /// Mixing weight of the cluster
    pub weight: f64,
    /// Parameters of each feature's component, in feature order
    pub components: Vec<String>,
}

fn validate_weights(k: usize, weights: &[f64]) -> Result<(), MixtureError> {
    if weights.len() != k {
        return Err(MixtureError::WeightsLengthMismatch {
            k,
            n_weights: weights.len(),
        });
    }
    if let Some((ix, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, &w)| !(w.is_finite() && w >= 0.0))
    {
        return Err(MixtureError::InvalidWeight { ix, weight });
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOL {
        return Err(MixtureError::WeightsDoNotSumToOne { sum });
    }
    Ok(())
}

impl MixtureModel {
    /// Create a model from explicit weights and a full component grid.
    ///
    /// # Arguments
    /// - k: number of clusters
    /// - n: number of features
    /// - weights: mixing weights; must have length `k` and sum to one
    /// - components: `k * n` components, cluster-major (all features of
    ///   cluster 0, then all features of cluster 1, ...)
    pub fn new(
        k: usize,
        n: usize,
        weights: Vec<f64>,
        components: Vec<Distribution>,
    ) -> Result<Self, MixtureError> {
        if k == 0 {
            return Err(MixtureError::ZeroClusters);
        }
        if n == 0 {
            return Err(MixtureError::ZeroFeatures);
        }
        if components.len() != k * n {
            return Err(MixtureError::GridSizeMismatch {
                expected: k * n,
                found: components.len(),
            });
        }
        validate_weights(k, &weights)?;

        Ok(MixtureModel {
            k,
            n,
            weights,
            components,
        })
    }

    /// A random model for generating synthetic data.
    ///
    /// Each feature is, on a fair coin flip, either categorical over
    /// [`DEMO_ALPHABET`] (with random weights in every cluster) or a standard
    /// Gaussian. Mixing weights are random.
    pub fn synthetic<R: Rng>(
        k: usize,
        n: usize,
        rng: &mut R,
    ) -> Result<Self, MixtureError> {
        if k == 0 {
            return Err(MixtureError::ZeroClusters);
        }
        if n == 0 {
            return Err(MixtureError::ZeroFeatures);
        }

        let categorical: Vec<bool> =
            (0..n).map(|_| rng.gen::<f64>() >= 0.5).collect();
        let alphabet: Vec<String> =
            DEMO_ALPHABET.iter().map(|s| s.to_string()).collect();

        let mut components = Vec::with_capacity(k * n);
        for _ in 0..k {
            for &is_cat in &categorical {
                let cpnt = if is_cat {
                    Categorical::random(alphabet.clone(), rng)
                        .map_err(ComponentError::from)
                        .map_err(MixtureError::Construction)?
                        .into()
                } else {
                    Gaussian::standard().into()
                };
                components.push(cpnt);
            }
        }

        let weights = random_weights(k, rng);
        MixtureModel::new(k, n, weights, components)
    }

    /// Build a model whose components fit the columns of `rows`.
    ///
    /// Column types are inferred with [`is_numeric_column`] on the distinct
    /// values of each column. Cells of numeric columns are rewritten in place
    /// to `Datum::Real`; cells of the remaining columns become
    /// `Datum::Category`. Numeric columns get a standard Gaussian in every
    /// cluster, categorical columns a randomly weighted `Categorical` over
    /// the observed values. Mixing weights are random.
    pub fn from_data<R: Rng>(
        k: usize,
        rows: &mut [Vec<Datum>],
        rng: &mut R,
    ) -> Result<Self, MixtureError> {
        if k == 0 {
            return Err(MixtureError::ZeroClusters);
        }
        let n = match rows.first() {
            Some(row) => row.len(),
            None => return Err(MixtureError::EmptyData),
        };
        if n == 0 {
            return Err(MixtureError::ZeroFeatures);
        }
        check_widths(rows, n)?;

        let mut columns: Vec<Option<Vec<String>>> = Vec::with_capacity(n);
        for j in 0..n {
            let distinct = distinct_values(rows, j);
            if is_numeric_column(&distinct) {
                rows.iter_mut().for_each(|row| {
                    if let Some(x) = coerce_real(&row[j]) {
                        row[j] = Datum::Real(x);
                    }
                });
                columns.push(None);
            } else {
                rows.iter_mut().for_each(|row| {
                    if row[j].is_real() {
                        row[j] = Datum::Category(row[j].to_string());
                    }
                });
                let values: Vec<String> =
                    distinct.iter().map(|x| x.to_string()).collect();
                columns.push(Some(values));
            }
        }

        debug!(
            "inferred {} numeric and {} categorical columns",
            columns.iter().filter(|c| c.is_none()).count(),
            columns.iter().filter(|c| c.is_some()).count(),
        );

        let mut components = Vec::with_capacity(k * n);
        for _ in 0..k {
            for column in &columns {
                let cpnt = match column {
                    None => Gaussian::standard().into(),
                    Some(values) => Categorical::random(values.clone(), rng)
                        .map_err(ComponentError::from)
                        .map_err(MixtureError::Construction)?
                        .into(),
                };
                components.push(cpnt);
            }
        }

        let weights = random_weights(k, rng);
        MixtureModel::new(k, n, weights, components)
    }

    /// Number of clusters
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of features
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Mixing weights
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The component modelling feature `j` in cluster `zi`
    #[inline]
    pub fn component(&self, zi: usize, j: usize) -> Option<&Distribution> {
        if zi < self.k && j < self.n {
            Some(&self.components[zi * self.n + j])
        } else {
            None
        }
    }

    /// The components of cluster `zi`, in feature order
    #[inline]
    pub fn cluster(&self, zi: usize) -> &[Distribution] {
        &self.components[zi * self.n..(zi + 1) * self.n]
    }

    /// Replace the component for feature `j` in cluster `zi`
    pub fn set_component(
        &mut self,
        zi: usize,
        j: usize,
        cpnt: Distribution,
    ) -> Result<(), MixtureError> {
        if zi >= self.k {
            Err(MixtureError::ClusterOutOfRange { zi, k: self.k })
        } else if j >= self.n {
            Err(MixtureError::FeatureOutOfRange { j, n: self.n })
        } else {
            self.components[zi * self.n + j] = cpnt;
            Ok(())
        }
    }

    fn check_dim(&self, x: &[Datum]) -> Result<(), MixtureError> {
        if x.len() == self.n {
            Ok(())
        } else {
            Err(MixtureError::DimensionMismatch {
                expected: self.n,
                found: x.len(),
            })
        }
    }

    /// Sum of the per-feature log likelihoods of `x` under cluster `zi`
    pub fn ln_f_k(&self, x: &[Datum], zi: usize) -> Result<f64, MixtureError> {
        self.check_dim(x)?;
        if zi >= self.k {
            return Err(MixtureError::ClusterOutOfRange { zi, k: self.k });
        }
        self.ln_f_k_unchecked(x, zi)
    }

    fn ln_f_k_unchecked(
        &self,
        x: &[Datum],
        zi: usize,
    ) -> Result<f64, MixtureError> {
        self.cluster(zi).iter().zip(x.iter()).enumerate().try_fold(
            0.0,
            |acc, (j, (cpnt, xj))| {
                cpnt.ln_f(xj)
                    .map(|ln_f| acc + ln_f)
                    .map_err(MixtureError::component(zi, j))
            },
        )
    }

    /// The cluster under which `x` is most likely.
    ///
    /// Ties go to the lowest cluster index.
    pub fn viterbi(&self, x: &[Datum]) -> Result<usize, MixtureError> {
        self.check_dim(x)?;
        self.viterbi_unchecked(x).map(|(zi, _)| zi)
    }

    /// `(cluster, ln_f)` of the best cluster for `x`
    fn viterbi_unchecked(
        &self,
        x: &[Datum],
    ) -> Result<(usize, f64), MixtureError> {
        let mut best = (0, self.ln_f_k_unchecked(x, 0)?);
        for zi in 1..self.k {
            let ln_f = self.ln_f_k_unchecked(x, zi)?;
            if ln_f > best.1 {
                best = (zi, ln_f);
            }
        }
        Ok(best)
    }

    /// Total log likelihood of `xs`, each row scored under its Viterbi
    /// cluster. Used to compare fits, not as a marginal likelihood.
    pub fn ln_likelihood(&self, xs: &[Vec<Datum>]) -> Result<f64, MixtureError> {
        xs.iter().try_fold(0.0, |acc, x| {
            self.check_dim(x)?;
            self.viterbi_unchecked(x).map(|(_, ln_f)| acc + ln_f)
        })
    }

    /// The row indices assigned to each cluster by [`viterbi`](Self::viterbi).
    ///
    /// Returns `k` lists that together hold every index of `xs` exactly
    /// once, each in increasing order.
    pub fn clustering(
        &self,
        xs: &[Vec<Datum>],
    ) -> Result<Vec<Vec<usize>>, MixtureError> {
        let mut part = Partition::new(self.k)?;
        for x in xs {
            part.push(self.viterbi(x)?)?;
        }
        Ok(part.members())
    }

    /// Draw `count` rows from the mixture.
    ///
    /// Each entry is the generating cluster and one value per feature.
    pub fn sample<R: Rng>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<(usize, Vec<Datum>)>, MixtureError> {
        pflip(&self.weights, count, rng)
            .into_iter()
            .map(|zi| {
                let row = self
                    .cluster(zi)
                    .iter()
                    .enumerate()
                    .map(|(j, cpnt)| {
                        cpnt.draw(rng).map_err(MixtureError::component(zi, j))
                    })
                    .collect::<Result<Vec<Datum>, _>>()?;
                Ok((zi, row))
            })
            .collect()
    }

    /// Weight and component parameters of every cluster
    pub fn describe(&self) -> Vec<ClusterDescription> {
        (0..self.k)
            .map(|zi| ClusterDescription {
                weight: self.weights[zi],
                components: self
                    .cluster(zi)
                    .iter()
                    .map(|cpnt| cpnt.to_string())
                    .collect(),
            })
            .collect()
    }
}

fn check_widths(rows: &[Vec<Datum>], n: usize) -> Result<(), MixtureError> {
    match rows.iter().position(|row| row.len() != n) {
        Some(row) => Err(MixtureError::InvalidRowWidth {
            row,
            expected: n,
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}

impl fmt::Display for MixtureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (zi, desc) in self.describe().iter().enumerate() {
            writeln!(f, "Cluster {} (weight: {})", zi + 1, desc.weight)?;
            for (j, cpnt) in desc.components.iter().enumerate() {
                writeln!(f, "  feature {}: {}", j, cpnt)?;
            }
        }
        Ok(())
    }
}
