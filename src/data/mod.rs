//! Data utilities
mod dataset;
mod datum;
mod load;
mod partition;
mod scale;
mod sniff;

pub use dataset::Dataset;
pub use datum::Datum;
pub use load::{load_file, parse_delimited, LoadError, DELIMITERS};
pub use partition::{Partition, PartitionError};
pub use scale::{scale, scale_column};
pub use sniff::{
    distinct_values, is_numeric_column, is_numeric_token, NUMERIC_MIN_DISTINCT,
};

pub(crate) use sniff::coerce_real;
