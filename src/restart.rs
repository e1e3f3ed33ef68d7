//! Random-restart driver
use crate::config::Config;
use crate::data::Datum;
use crate::mixture::{MixtureError, MixtureModel};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use std::fmt;

/// Fits several independently initialized mixtures and keeps the one with
/// the highest Viterbi log likelihood.
#[derive(Clone, Debug, PartialEq)]
pub struct RestartDriver {
    k: usize,
    restarts: usize,
}

/// Outcome of a single restart
#[derive(Clone, Debug, PartialEq)]
pub enum RestartRecord {
    Fitted {
        /// Passes of `learn` in which at least one row moved
        n_changed_passes: usize,
        /// `ln_likelihood` of the data under the fitted model
        score: f64,
    },
    Failed(MixtureError),
}

/// The winning model of a [`RestartDriver::fit`]
#[derive(Clone, Debug, PartialEq)]
pub struct BestFit {
    pub model: MixtureModel,
    pub score: f64,
    /// One record per restart, in the order they ran
    pub restarts: Vec<RestartRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestartError {
    /// k must be at least 1
    ZeroClusters,
    /// At least one restart is required
    ZeroRestarts,
    /// Every restart failed; holds the error of each, in order
    AllFailed(Vec<MixtureError>),
}

impl RestartRecord {
    pub fn score(&self) -> Option<f64> {
        match self {
            RestartRecord::Fitted { score, .. } => Some(*score),
            RestartRecord::Failed(_) => None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, RestartRecord::Fitted { .. })
    }
}

impl RestartDriver {
    /// Create a new driver
    ///
    /// # Arguments
    /// - k: number of clusters of every fitted model
    /// - restarts: number of independent fits
    pub fn new(k: usize, restarts: usize) -> Result<Self, RestartError> {
        if k == 0 {
            Err(RestartError::ZeroClusters)
        } else if restarts == 0 {
            Err(RestartError::ZeroRestarts)
        } else {
            Ok(RestartDriver { k, restarts })
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, RestartError> {
        Self::new(config.k, config.restarts)
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Fit `restarts` models to `rows` and return the best.
    ///
    /// Every restart draws a seed from `rng` and runs on its own generator,
    /// so a fixed master seed reproduces the whole fit. A restart builds a
    /// model with [`MixtureModel::from_data`], which also coerces the cells
    /// of `rows` in place, then learns and scores it. A later restart
    /// replaces the best only with a strictly greater score. Failed restarts
    /// are logged and skipped.
    pub fn fit<R: Rng + SeedableRng>(
        &self,
        rows: &mut [Vec<Datum>],
        rng: &mut R,
    ) -> Result<BestFit, RestartError> {
        let k = self.k;
        self.fit_with(rows, rng, |rows, rng| fit_once(k, rows, rng))
    }

    /// The restart loop of [`fit`](Self::fit) with each single fit supplied
    /// by `fit_once`, which returns the model, its passes with changes, and
    /// its score.
    pub(crate) fn fit_with<R, F>(
        &self,
        rows: &mut [Vec<Datum>],
        rng: &mut R,
        mut fit_once: F,
    ) -> Result<BestFit, RestartError>
    where
        R: Rng + SeedableRng,
        F: FnMut(
            &mut [Vec<Datum>],
            &mut R,
        ) -> Result<(MixtureModel, usize, f64), MixtureError>,
    {
        let mut best: Option<(MixtureModel, f64)> = None;
        let mut records = Vec::with_capacity(self.restarts);

        for ix in 0..self.restarts {
            let mut restart_rng = R::seed_from_u64(rng.gen());
            match fit_once(rows, &mut restart_rng) {
                Ok((model, n_changed_passes, score)) => {
                    debug!(
                        "restart {}: score = {}, {} passes with changes",
                        ix, score, n_changed_passes
                    );
                    records.push(RestartRecord::Fitted {
                        n_changed_passes,
                        score,
                    });
                    let improved = match best {
                        Some((_, best_score)) => score > best_score,
                        None => true,
                    };
                    if improved {
                        best = Some((model, score));
                    }
                }
                Err(err) => {
                    warn!("restart {} failed: {}", ix, err);
                    records.push(RestartRecord::Failed(err));
                }
            }
        }

        match best {
            Some((model, score)) => {
                info!(
                    "best of {} restarts: score = {} ({} failed)",
                    self.restarts,
                    score,
                    records.iter().filter(|r| !r.is_fitted()).count()
                );
                Ok(BestFit {
                    model,
                    score,
                    restarts: records,
                })
            }
            None => Err(RestartError::AllFailed(
                records
                    .into_iter()
                    .filter_map(|record| match record {
                        RestartRecord::Failed(err) => Some(err),
                        RestartRecord::Fitted { .. } => None,
                    })
                    .collect(),
            )),
        }
    }
}

fn fit_once<R: Rng>(
    k: usize,
    rows: &mut [Vec<Datum>],
    rng: &mut R,
) -> Result<(MixtureModel, usize, f64), MixtureError> {
    let mut model = MixtureModel::from_data(k, rows, rng)?;
    let n_changed_passes = model.learn(rows, rng)?;
    let score = model.ln_likelihood(rows)?;
    Ok((model, n_changed_passes, score))
}

impl fmt::Display for RestartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClusters => write!(f, "k must be at least 1"),
            Self::ZeroRestarts => write!(f, "at least one restart is required"),
            Self::AllFailed(errs) => {
                write!(f, "all {} restarts failed", errs.len())?;
                if let Some(err) = errs.last() {
                    write!(f, "; last error: {}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RestartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AllFailed(errs) => errs
                .last()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Gaussian;
    use rand_xoshiro::Xoshiro256Plus;

    fn two_blobs() -> Vec<Vec<Datum>> {
        (0..40)
            .map(|i| {
                let offset = if i % 2 == 0 { 0.0 } else { 10.0 };
                let label = if i % 2 == 0 { "lo" } else { "hi" };
                vec![
                    Datum::Real(offset + (i as f64) * 0.013),
                    Datum::from(label),
                ]
            })
            .collect()
    }

    #[test]
    fn new_rejects_zero_settings() {
        assert_eq!(RestartDriver::new(0, 3), Err(RestartError::ZeroClusters));
        assert_eq!(RestartDriver::new(2, 0), Err(RestartError::ZeroRestarts));
    }

    #[test]
    fn from_config_copies_settings() {
        let config = Config::default().with_k(4).with_restarts(6);
        let driver = RestartDriver::from_config(&config).unwrap();
        assert_eq!(driver.k(), 4);
        assert_eq!(driver.restarts(), 6);
    }

    #[test]
    fn best_score_is_the_max_of_the_records() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let driver = RestartDriver::new(2, 8).unwrap();
        let mut rows = two_blobs();

        let fit = driver.fit(&mut rows, &mut rng).unwrap();

        assert_eq!(fit.restarts.len(), 8);
        let max = fit
            .restarts
            .iter()
            .filter_map(RestartRecord::score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(fit.score, max);
        assert::close(fit.model.ln_likelihood(&rows).unwrap(), fit.score, 1E-9);
    }

    #[test]
    fn best_fit_separates_the_blobs() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        let driver = RestartDriver::new(2, 10).unwrap();
        let mut rows = two_blobs();

        let fit = driver.fit(&mut rows, &mut rng).unwrap();
        let mut members = fit.model.clustering(&rows).unwrap();
        members.sort();

        let evens: Vec<usize> = (0..40).step_by(2).collect();
        let odds: Vec<usize> = (1..40).step_by(2).collect();
        assert_eq!(members, vec![evens, odds]);
    }

    #[test]
    fn fit_is_reproducible_for_a_fixed_seed() {
        let driver = RestartDriver::new(3, 4).unwrap();
        let run = || {
            let mut rng = Xoshiro256Plus::seed_from_u64(99);
            driver.fit(&mut two_blobs(), &mut rng)
        };
        assert_eq!(run(), run());
    }

    fn one_cluster_model(mu: f64) -> MixtureModel {
        MixtureModel::new(
            1,
            1,
            vec![1.0],
            vec![Gaussian::new(mu, 1.0).unwrap().into()],
        )
        .unwrap()
    }

    #[test]
    fn failures_after_a_success_leave_the_best_alone() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let driver = RestartDriver::new(1, 5).unwrap();
        let mut outcomes = vec![
            Ok((one_cluster_model(0.0), 3, -10.0)),
            Err(MixtureError::EmptyData),
            Ok((one_cluster_model(1.0), 1, -20.0)),
            Err(MixtureError::ZeroFeatures),
            // a tie does not replace the earlier best
            Ok((one_cluster_model(2.0), 2, -10.0)),
        ]
        .into_iter();

        let fit = driver
            .fit_with(&mut [], &mut rng, |_, _| outcomes.next().unwrap())
            .unwrap();

        assert_eq!(fit.score, -10.0);
        assert_eq!(fit.model, one_cluster_model(0.0));
        assert_eq!(
            fit.restarts,
            vec![
                RestartRecord::Fitted {
                    n_changed_passes: 3,
                    score: -10.0
                },
                RestartRecord::Failed(MixtureError::EmptyData),
                RestartRecord::Fitted {
                    n_changed_passes: 1,
                    score: -20.0
                },
                RestartRecord::Failed(MixtureError::ZeroFeatures),
                RestartRecord::Fitted {
                    n_changed_passes: 2,
                    score: -10.0
                },
            ]
        );
    }

    #[test]
    fn later_better_fit_replaces_the_best_after_a_failure() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let driver = RestartDriver::new(1, 3).unwrap();
        let mut outcomes = vec![
            Err(MixtureError::EmptyData),
            Ok((one_cluster_model(0.0), 1, -10.0)),
            Ok((one_cluster_model(5.0), 1, -4.0)),
        ]
        .into_iter();

        let fit = driver
            .fit_with(&mut [], &mut rng, |_, _| outcomes.next().unwrap())
            .unwrap();

        assert_eq!(fit.score, -4.0);
        assert_eq!(fit.model, one_cluster_model(5.0));
    }

    #[test]
    fn best_score_holds_with_mixed_outcomes_on_real_data() {
        // many clusters on few distinct values makes some restarts collapse
        let mut rows: Vec<Vec<Datum>> =
            (0..12).map(|i| vec![Datum::Real(i as f64)]).collect();
        let driver = RestartDriver::new(6, 10).unwrap();

        for seed in 0..5_u64 {
            let mut rng = Xoshiro256Plus::seed_from_u64(seed);
            if let Ok(fit) = driver.fit(&mut rows, &mut rng) {
                let max = fit
                    .restarts
                    .iter()
                    .filter_map(RestartRecord::score)
                    .fold(f64::NEG_INFINITY, f64::max);
                assert_eq!(fit.score, max);
                assert_eq!(fit.restarts.len(), 10);
            }
        }
    }

    #[test]
    fn every_restart_failing_is_an_error() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let driver = RestartDriver::new(2, 3).unwrap();
        let mut rows: Vec<Vec<Datum>> = Vec::new();

        match driver.fit(&mut rows, &mut rng) {
            Err(RestartError::AllFailed(errs)) => {
                assert_eq!(errs, vec![MixtureError::EmptyData; 3]);
            }
            other => panic!("expected AllFailed, got {:?}", other),
        }
    }
}
