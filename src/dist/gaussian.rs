//! Gaussian/Normal distribution over x in (-∞, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::distributions::Open01;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::consts::{HALF_LN_2PI, TWO_PI};
use crate::data::Datum;
use crate::dist::ComponentError;
use crate::impl_display;
use crate::traits::Component;

/// Gaussian / [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution),
/// N(μ, σ²) over real values.
///
/// Parameterized by mean and *variance*. A variance of zero is a legal state
/// (it is what `learn` produces from a single distinct value) but every
/// density evaluation and draw from such a component fails with
/// [`GaussianError::DegenerateVariance`].
///
/// # Example
///
/// ```
/// use nbmix::prelude::*;
///
/// let mut gauss = Gaussian::standard();
/// let xs: Vec<Datum> = [2.0, 4.0, 6.0].iter().map(|&x| Datum::Real(x)).collect();
/// let refs: Vec<&Datum> = xs.iter().collect();
///
/// gauss.learn(&refs).unwrap();
///
/// assert::close(gauss.mu(), 4.0, 1E-12);
/// assert::close(gauss.var(), 8.0 / 3.0, 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Gaussian {
    /// Mean
    mu: f64,
    /// Variance, σ²
    var: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianError {
    /// The mu parameter is infinite or NaN
    MuNotFinite { mu: f64 },
    /// The variance parameter is less than zero
    VarianceNegative { var: f64 },
    /// The variance parameter is infinite or NaN
    VarianceNotFinite { var: f64 },
    /// The variance is zero, so the density is undefined
    DegenerateVariance { mu: f64 },
}

impl Gaussian {
    /// Create a new Gaussian distribution
    ///
    /// # Arguments
    /// - mu: mean
    /// - var: variance, σ². Zero is accepted.
    pub fn new(mu: f64, var: f64) -> Result<Self, GaussianError> {
        if !mu.is_finite() {
            Err(GaussianError::MuNotFinite { mu })
        } else if var < 0.0 {
            Err(GaussianError::VarianceNegative { var })
        } else if !var.is_finite() {
            Err(GaussianError::VarianceNotFinite { var })
        } else {
            Ok(Gaussian { mu, var })
        }
    }

    /// Creates a new Gaussian without checking whether the parameters are
    /// valid.
    #[inline]
    #[must_use]
    pub fn new_unchecked(mu: f64, var: f64) -> Self {
        Gaussian { mu, var }
    }

    /// Standard normal
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nbmix::dist::Gaussian;
    /// let gauss = Gaussian::standard();
    ///
    /// assert_eq!(gauss, Gaussian::new(0.0, 1.0).unwrap());
    /// ```
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Gaussian { mu: 0.0, var: 1.0 }
    }

    /// Get mu parameter
    #[inline]
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get the variance, σ²
    #[inline]
    #[must_use]
    pub fn var(&self) -> f64 {
        self.var
    }

    /// `Ok(var)` if the variance is usable for densities and draws
    #[inline]
    fn checked_var(&self) -> Result<f64, GaussianError> {
        if self.var > 0.0 {
            Ok(self.var)
        } else {
            Err(GaussianError::DegenerateVariance { mu: self.mu })
        }
    }

    fn real(x: &Datum) -> Result<f64, ComponentError> {
        x.as_real().ok_or(ComponentError::DatumTypeMismatch {
            expected: "real",
            found: x.kind(),
        })
    }

    /// Box-Muller draws of N(μ, σ²).
    ///
    /// Each pair of uniforms on (0, 1) yields two values; ⌈n/2⌉ pairs are
    /// drawn, shuffled together, and cut down to `n`.
    fn box_muller<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, GaussianError> {
        let sigma = self.checked_var()?.sqrt();
        let n_pairs = (n + 1) / 2;

        let mut zs: Vec<f64> = Vec::with_capacity(2 * n_pairs);
        for _ in 0..n_pairs {
            let x: f64 = rng.sample(Open01);
            let y: f64 = rng.sample(Open01);
            let r = (-2.0 * x.ln()).sqrt();
            let theta = TWO_PI * y;
            zs.push((r * theta.cos()).mul_add(sigma, self.mu));
            zs.push((r * theta.sin()).mul_add(sigma, self.mu));
        }

        zs.shuffle(rng);
        zs.truncate(n);
        Ok(zs)
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::standard()
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!("N(μ: {}, σ²: {})", gauss.mu, gauss.var)
    }
}

impl_display!(Gaussian);

impl Component for Gaussian {
    /// Sets μ to the sample mean and σ² to the biased (divide by n) sample
    /// variance of `xs`.
    fn learn(&mut self, xs: &[&Datum]) -> Result<(), ComponentError> {
        if xs.is_empty() {
            return Ok(());
        }

        let values: Vec<f64> =
            xs.iter().map(|x| Self::real(x)).collect::<Result<_, _>>()?;
        let n = values.len() as f64;

        let mu = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|&x| (x - mu).powi(2)).sum::<f64>() / n;

        self.mu = mu;
        self.var = var;
        Ok(())
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> Result<Datum, ComponentError> {
        let mut xs = self.box_muller(1, rng)?;
        Ok(Datum::Real(xs.pop().unwrap_or(self.mu)))
    }

    fn sample<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Datum>, ComponentError> {
        Ok(self
            .box_muller(n, rng)?
            .into_iter()
            .map(Datum::Real)
            .collect())
    }

    fn f(&self, x: &Datum) -> Result<f64, ComponentError> {
        let x = Self::real(x)?;
        let var = self.checked_var()?;
        let d = self.mu - x;
        Ok((-d * d / (2.0 * var)).exp() / (TWO_PI * var).sqrt())
    }

    fn ln_f(&self, x: &Datum) -> Result<f64, ComponentError> {
        let x = Self::real(x)?;
        let var = self.checked_var()?;
        let d = self.mu - x;
        Ok(0.5f64.mul_add(-var.ln(), -d * d / (2.0 * var)) - HALF_LN_2PI)
    }
}

impl fmt::Display for GaussianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => write!(f, "non-finite mu: {}", mu),
            Self::VarianceNegative { var } => {
                write!(f, "var ({}) must be greater than or equal to zero", var)
            }
            Self::VarianceNotFinite { var } => {
                write!(f, "non-finite var: {}", var)
            }
            Self::DegenerateVariance { mu } => write!(
                f,
                "Gaussian with mu = {} has zero variance; density undefined",
                mu
            ),
        }
    }
}

impl std::error::Error for GaussianError {}
