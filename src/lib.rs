//! Unsupervised clustering of mixed categorical and continuous data.
//!
//! A [`MixtureModel`](mixture::MixtureModel) is a naive-Bayes mixture: each
//! of `k` clusters models every feature with an independent component, a
//! [`Categorical`](dist::Categorical) for symbolic columns or a
//! [`Gaussian`](dist::Gaussian) for numeric ones. Models are fit with hard
//! (Viterbi) EM, and [`RestartDriver`](restart::RestartDriver) keeps the
//! best of several randomly initialized fits.
//!
//! # Example
//!
//! ```
//! use nbmix::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(0x1234);
//!
//! // draw labelled data from a random model
//! let truth = MixtureModel::synthetic(3, 4, &mut rng).unwrap();
//! let mut data = Dataset::from_samples(truth.sample(200, &mut rng).unwrap());
//!
//! let driver = RestartDriver::new(3, 5).unwrap();
//! let fit = driver.fit(&mut data.rows, &mut rng).unwrap();
//!
//! let members = fit.model.clustering(&data.rows).unwrap();
//! let tallies = data.tally_labels(&members);
//! assert_eq!(tallies.len(), 3);
//! ```

pub mod config;
pub mod consts;
pub mod data;
pub mod dist;
pub mod misc;
pub mod mixture;
pub mod prelude;
pub mod restart;
pub mod traits;
