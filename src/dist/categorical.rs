//! Categorical distribution over a finite set of labels
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::data::Datum;
use crate::dist::ComponentError;
use crate::impl_display;
use crate::misc::{catflip, cumsum, normalize, random_weights};
use crate::traits::Component;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// [Categorical distribution](https://en.wikipedia.org/wiki/Categorical_distribution)
/// over an ordered set of distinct labels.
///
/// Each label is mapped to an index, and `weights[ix]` is the probability
/// of the label at `ix`. The weights always sum to one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Categorical {
    /// Index -> label
    values: Vec<String>,
    /// Label -> index
    index: HashMap<String, usize>,
    weights: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum CategoricalError {
    /// One or more of the weights is infinite or NaN
    NonFiniteWeight { ix: usize, weight: f64 },
    /// One or more of the weights is less than zero
    NegativeWeight { ix: usize, weight: f64 },
    /// The weights sum to zero and cannot be normalized
    ZeroWeightSum,
    /// The number of weights does not match the number of values
    WeightsLengthMismatch { n_values: usize, n_weights: usize },
    /// No values were supplied
    EmptyValues,
    /// A value was supplied more than once
    DuplicateValue { value: String },
    /// The value is not one of the categories of this distribution
    UnknownCategoryValue { value: String },
}

impl Categorical {
    /// Construct a new Categorical distribution from labels and weights
    ///
    /// # Arguments
    /// - values: the distinct labels, in index order
    /// - weights: A vector describing the proportional likelihood of each
    ///   label. The weights must all be non-negative, but do not need to sum
    ///   to 1 because they will be normalized in the constructor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nbmix::traits::Component;
    /// # use nbmix::dist::Categorical;
    /// # use nbmix::data::Datum;
    /// let values = vec!["a".to_string(), "b".to_string()];
    /// let cat = Categorical::new(values, &[3.0, 1.0]).unwrap();
    ///
    /// assert::close(cat.f(&Datum::from("a")).unwrap(), 0.75, 1E-12);
    /// assert!(cat.f(&Datum::from("z")).is_err());
    /// ```
    pub fn new(
        values: Vec<String>,
        weights: &[f64],
    ) -> Result<Self, CategoricalError> {
        if values.len() != weights.len() {
            return Err(CategoricalError::WeightsLengthMismatch {
                n_values: values.len(),
                n_weights: weights.len(),
            });
        }

        weights.iter().enumerate().try_for_each(|(ix, &weight)| {
            if weight < 0.0 {
                Err(CategoricalError::NegativeWeight { ix, weight })
            } else if !weight.is_finite() {
                Err(CategoricalError::NonFiniteWeight { ix, weight })
            } else {
                Ok(())
            }
        })?;

        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(CategoricalError::ZeroWeightSum);
        }

        let index = Self::build_index(&values)?;
        let mut weights = weights.to_vec();
        normalize(&mut weights);

        Ok(Categorical {
            values,
            index,
            weights,
        })
    }

    /// Categorical over `values` with independently drawn, normalized
    /// random weights
    pub fn random<R: Rng>(
        values: Vec<String>,
        rng: &mut R,
    ) -> Result<Self, CategoricalError> {
        let index = Self::build_index(&values)?;
        let weights = random_weights(values.len(), rng);
        Ok(Categorical {
            values,
            index,
            weights,
        })
    }

    /// Categorical over `values` with equal weights
    pub fn uniform(values: Vec<String>) -> Result<Self, CategoricalError> {
        let weights = vec![1.0; values.len()];
        Categorical::new(values, &weights)
    }

    fn build_index(
        values: &[String],
    ) -> Result<HashMap<String, usize>, CategoricalError> {
        if values.is_empty() {
            return Err(CategoricalError::EmptyValues);
        }

        let mut index = HashMap::with_capacity(values.len());
        for (ix, value) in values.iter().enumerate() {
            if index.insert(value.clone(), ix).is_some() {
                return Err(CategoricalError::DuplicateValue {
                    value: value.clone(),
                });
            }
        }
        Ok(index)
    }

    /// Get the number of possible outcomes
    #[inline]
    pub fn k(&self) -> usize {
        self.values.len()
    }

    /// The labels in index order
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The probability of each label, in index order
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The index of `value`, if it is a known label
    #[inline]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    fn ix(&self, x: &Datum) -> Result<usize, ComponentError> {
        match x {
            Datum::Category(value) => self.index_of(value).ok_or_else(|| {
                CategoricalError::UnknownCategoryValue {
                    value: value.clone(),
                }
                .into()
            }),
            Datum::Real(_) => Err(ComponentError::DatumTypeMismatch {
                expected: "category",
                found: x.kind(),
            }),
        }
    }
}

impl From<&Categorical> for String {
    fn from(cat: &Categorical) -> String {
        let pairs: Vec<String> = cat
            .values
            .iter()
            .zip(cat.weights.iter())
            .map(|(v, w)| format!("{}: {:.5}", v, w))
            .collect();
        format!("Categorical(k: {}; {})", cat.k(), pairs.join(", "))
    }
}

impl_display!(Categorical);

impl Component for Categorical {
    /// Sets the weights to the relative frequency of each label in `xs`.
    fn learn(&mut self, xs: &[&Datum]) -> Result<(), ComponentError> {
        if xs.is_empty() {
            return Ok(());
        }

        let mut counts = vec![0_usize; self.k()];
        for x in xs {
            counts[self.ix(x)?] += 1;
        }

        let n = xs.len() as f64;
        self.weights
            .iter_mut()
            .zip(counts)
            .for_each(|(w, ct)| *w = ct as f64 / n);

        Ok(())
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> Result<Datum, ComponentError> {
        let cws = cumsum(&self.weights);
        let ix = catflip(&cws, rng.gen());
        Ok(Datum::Category(self.values[ix].clone()))
    }

    fn sample<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Datum>, ComponentError> {
        let cws = cumsum(&self.weights);
        Ok((0..n)
            .map(|_| {
                let ix = catflip(&cws, rng.gen());
                Datum::Category(self.values[ix].clone())
            })
            .collect())
    }

    fn f(&self, x: &Datum) -> Result<f64, ComponentError> {
        self.ix(x).map(|ix| self.weights[ix])
    }

    fn ln_f(&self, x: &Datum) -> Result<f64, ComponentError> {
        self.f(x).map(f64::ln)
    }
}

impl fmt::Display for CategoricalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteWeight { ix, weight } => {
                write!(f, "non-finite weight at index {}: {}", ix, weight)
            }
            Self::NegativeWeight { ix, weight } => {
                write!(f, "negative weight at index {}: {}", ix, weight)
            }
            Self::ZeroWeightSum => write!(f, "weights sum to zero"),
            Self::WeightsLengthMismatch {
                n_values,
                n_weights,
            } => write!(
                f,
                "{} weights supplied for {} values",
                n_weights, n_values
            ),
            Self::EmptyValues => write!(f, "empty values vector"),
            Self::DuplicateValue { value } => {
                write!(f, "value '{}' appears more than once", value)
            }
            Self::UnknownCategoryValue { value } => {
                write!(f, "unknown category value '{}'", value)
            }
        }
    }
}

impl std::error::Error for CategoricalError {}
