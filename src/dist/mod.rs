//! Probability distributions used as mixture components
mod categorical;
mod distribution;
mod gaussian;

pub use categorical::{Categorical, CategoricalError};
pub use distribution::{ComponentError, Distribution};
pub use gaussian::{Gaussian, GaussianError};
