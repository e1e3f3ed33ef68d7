//! Trait definitions
use crate::data::Datum;
use crate::dist::ComponentError;
use rand::Rng;

/// A per-feature probability distribution inside a mixture.
///
/// Every cell of a [`MixtureModel`](crate::mixture::MixtureModel) grid is a
/// `Component`. Implementors own their parameters outright; nothing is
/// shared between two components.
pub trait Component {
    /// Re-estimate the parameters from the observations `xs`.
    ///
    /// An empty batch leaves the parameters untouched.
    fn learn(&mut self, xs: &[&Datum]) -> Result<(), ComponentError>;

    /// Single draw from the `Component`
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<Datum, ComponentError>;

    /// Multiple draws of the `Component`
    fn sample<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Datum>, ComponentError> {
        (0..n).map(|_| self.draw(rng)).collect()
    }

    /// Probability (mass or density) of `x`
    fn f(&self, x: &Datum) -> Result<f64, ComponentError> {
        self.ln_f(x).map(f64::exp)
    }

    /// Natural log of the probability of `x`
    fn ln_f(&self, x: &Datum) -> Result<f64, ComponentError>;
}
