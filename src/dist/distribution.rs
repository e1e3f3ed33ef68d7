#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::{Categorical, CategoricalError, Gaussian, GaussianError};
use crate::data::Datum;
use crate::traits::Component;
use rand::Rng;
use std::fmt;

/// Represents any per-feature component of a mixture
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Distribution {
    Categorical(Categorical),
    Gaussian(Gaussian),
}

/// Errors raised by any [`Component`]
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    Categorical(CategoricalError),
    Gaussian(GaussianError),
    /// A real value was passed to a categorical component or vice versa
    DatumTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl Distribution {
    /// Short name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Distribution::Categorical(_) => "categorical",
            Distribution::Gaussian(_) => "gaussian",
        }
    }
}

impl From<Categorical> for Distribution {
    fn from(cat: Categorical) -> Self {
        Distribution::Categorical(cat)
    }
}

impl From<Gaussian> for Distribution {
    fn from(gauss: Gaussian) -> Self {
        Distribution::Gaussian(gauss)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Categorical(inner) => fmt::Display::fmt(inner, f),
            Distribution::Gaussian(inner) => fmt::Display::fmt(inner, f),
        }
    }
}

impl Component for Distribution {
    fn learn(&mut self, xs: &[&Datum]) -> Result<(), ComponentError> {
        match self {
            Distribution::Categorical(inner) => inner.learn(xs),
            Distribution::Gaussian(inner) => inner.learn(xs),
        }
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> Result<Datum, ComponentError> {
        match self {
            Distribution::Categorical(inner) => inner.draw(rng),
            Distribution::Gaussian(inner) => inner.draw(rng),
        }
    }

    fn sample<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Datum>, ComponentError> {
        match self {
            Distribution::Categorical(inner) => inner.sample(n, rng),
            Distribution::Gaussian(inner) => inner.sample(n, rng),
        }
    }

    fn f(&self, x: &Datum) -> Result<f64, ComponentError> {
        match self {
            Distribution::Categorical(inner) => inner.f(x),
            Distribution::Gaussian(inner) => inner.f(x),
        }
    }

    fn ln_f(&self, x: &Datum) -> Result<f64, ComponentError> {
        match self {
            Distribution::Categorical(inner) => inner.ln_f(x),
            Distribution::Gaussian(inner) => inner.ln_f(x),
        }
    }
}

impl From<CategoricalError> for ComponentError {
    fn from(err: CategoricalError) -> Self {
        ComponentError::Categorical(err)
    }
}

impl From<GaussianError> for ComponentError {
    fn from(err: GaussianError) -> Self {
        ComponentError::Gaussian(err)
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical(err) => fmt::Display::fmt(err, f),
            Self::Gaussian(err) => fmt::Display::fmt(err, f),
            Self::DatumTypeMismatch { expected, found } => {
                write!(f, "expected a {} datum, found a {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ComponentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Categorical(err) => Some(err),
            Self::Gaussian(err) => Some(err),
            Self::DatumTypeMismatch { .. } => None,
        }
    }
}
