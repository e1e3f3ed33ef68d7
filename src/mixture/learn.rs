//! Hard (Viterbi) expectation-maximization
use super::{check_widths, MixtureError, MixtureModel};
use crate::data::{Datum, Partition};
use crate::traits::Component;
use log::{debug, info, warn};
use rand::Rng;

/// Upper bound on the number of passes `learn` will run
pub const MAX_PASSES: usize = 1000;

impl MixtureModel {
    /// Fit the model to `xs` by hard EM.
    ///
    /// Rows start in uniformly random clusters. Each pass then
    /// 1. sets the mixing weights to the cluster occupancy fractions,
    /// 2. re-learns the components of every non-empty cluster from its rows
    ///    (empty clusters keep their previous parameters), and
    /// 3. moves every row to its [`viterbi`](Self::viterbi) cluster.
    ///
    /// Training stops after the first pass in which no row moves, or after
    /// [`MAX_PASSES`] passes. Returns the number of passes in which at least
    /// one row moved.
    ///
    /// An empty `xs` leaves the model untouched and returns 0. Any component
    /// failure (e.g. a cluster whose Gaussian collapses to zero variance)
    /// aborts the fit and leaves the model partially updated.
    pub fn learn<R: Rng>(
        &mut self,
        xs: &[Vec<Datum>],
        rng: &mut R,
    ) -> Result<usize, MixtureError> {
        self.learn_with_cap(xs, rng, MAX_PASSES, |_| ())
    }

    /// [`learn`](Self::learn) with an explicit pass cap. `on_pass` sees the
    /// model after the weights and components of each pass are updated.
    pub(crate) fn learn_with_cap<R, F>(
        &mut self,
        xs: &[Vec<Datum>],
        rng: &mut R,
        max_passes: usize,
        mut on_pass: F,
    ) -> Result<usize, MixtureError>
    where
        R: Rng,
        F: FnMut(&MixtureModel),
    {
        check_widths(xs, self.n)?;
        if xs.is_empty() {
            return Ok(0);
        }

        let mut asgn = Partition::random(xs.len(), self.k, rng)?;
        let mut n_passes: usize = 0;
        let mut n_changed_passes: usize = 0;

        loop {
            self.weights = asgn.weights();

            for (zi, ixs) in asgn.members().iter().enumerate() {
                if !ixs.is_empty() {
                    self.learn_cluster(zi, xs, ixs)?;
                }
            }
            on_pass(self);

            let mut n_moved: usize = 0;
            for (ix, x) in xs.iter().enumerate() {
                let (zi, _) = self.viterbi_unchecked(x)?;
                if asgn.reassign(ix, zi)? {
                    n_moved += 1;
                }
            }

            n_passes += 1;
            debug!(
                "pass {}: {} rows moved, counts = {:?}",
                n_passes,
                n_moved,
                asgn.counts()
            );

            if n_moved == 0 {
                break;
            }
            n_changed_passes += 1;

            if n_passes >= max_passes {
                warn!(
                    "stopping after {} passes without converging ({} rows \
                     moved in the last pass)",
                    n_passes, n_moved
                );
                break;
            }
        }

        info!(
            "learned k = {} mixture on {} rows in {} passes",
            self.k,
            xs.len(),
            n_passes
        );
        Ok(n_changed_passes)
    }

    /// Re-learn every component of cluster `zi` from the rows `ixs` of `xs`
    fn learn_cluster(
        &mut self,
        zi: usize,
        xs: &[Vec<Datum>],
        ixs: &[usize],
    ) -> Result<(), MixtureError> {
        let n = self.n;
        let cluster = &mut self.components[zi * n..(zi + 1) * n];
        for (j, cpnt) in cluster.iter_mut().enumerate() {
            let column: Vec<&Datum> = ixs.iter().map(|&ix| &xs[ix][j]).collect();
            cpnt.learn(&column)
                .map_err(MixtureError::component(zi, j))?;
        }
        Ok(())
    }
}
