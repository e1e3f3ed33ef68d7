//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::config::Config;
#[doc(no_inline)]
pub use crate::data::{Dataset, Datum};
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::mixture::{MixtureError, MixtureModel};
#[doc(no_inline)]
pub use crate::restart::{BestFit, RestartDriver, RestartRecord};
#[doc(no_inline)]
pub use crate::traits::*;
