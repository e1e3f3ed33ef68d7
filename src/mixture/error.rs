use crate::data::PartitionError;
use crate::dist::ComponentError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MixtureError {
    /// A mixture needs at least one cluster
    ZeroClusters,
    /// A mixture needs at least one feature
    ZeroFeatures,
    /// No rows were supplied where at least one is required
    EmptyData,
    /// The component grid does not hold k × n components
    GridSizeMismatch { expected: usize, found: usize },
    /// The number of mixing weights is not k
    WeightsLengthMismatch { k: usize, n_weights: usize },
    /// A mixing weight is negative, infinite, or NaN
    InvalidWeight { ix: usize, weight: f64 },
    /// The mixing weights do not sum to 1
    WeightsDoNotSumToOne { sum: f64 },
    /// Cluster index past the end of the grid
    ClusterOutOfRange { zi: usize, k: usize },
    /// Feature index past the end of the grid
    FeatureOutOfRange { j: usize, n: usize },
    /// A dataset row does not have n cells
    InvalidRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A feature vector does not have n entries
    DimensionMismatch { expected: usize, found: usize },
    /// A component could not be built
    Construction(ComponentError),
    /// A component failed while learning, scoring, or sampling
    Component {
        cluster: usize,
        feature: usize,
        source: ComponentError,
    },
    Partition(PartitionError),
}

impl MixtureError {
    /// Attach the grid position of a failing component
    pub(crate) fn component(
        cluster: usize,
        feature: usize,
    ) -> impl Fn(ComponentError) -> Self {
        move |source| MixtureError::Component {
            cluster,
            feature,
            source,
        }
    }
}

impl From<PartitionError> for MixtureError {
    fn from(err: PartitionError) -> Self {
        MixtureError::Partition(err)
    }
}

impl fmt::Display for MixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClusters => write!(f, "k must be at least 1"),
            Self::ZeroFeatures => write!(f, "rows must have at least 1 feature"),
            Self::EmptyData => write!(f, "no rows supplied"),
            Self::GridSizeMismatch { expected, found } => write!(
                f,
                "expected {} components in the grid, found {}",
                expected, found
            ),
            Self::WeightsLengthMismatch { k, n_weights } => {
                write!(f, "{} weights supplied for {} clusters", n_weights, k)
            }
            Self::InvalidWeight { ix, weight } => {
                write!(f, "invalid mixing weight at index {}: {}", ix, weight)
            }
            Self::WeightsDoNotSumToOne { sum } => {
                write!(f, "mixing weights sum to {}, should sum to one", sum)
            }
            Self::ClusterOutOfRange { zi, k } => {
                write!(f, "cluster {} out of range for k = {}", zi, k)
            }
            Self::FeatureOutOfRange { j, n } => {
                write!(f, "feature {} out of range for n = {}", j, n)
            }
            Self::InvalidRowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "feature vector has {} entries, expected {}",
                found, expected
            ),
            Self::Construction(err) => {
                write!(f, "failed to build component: {}", err)
            }
            Self::Component {
                cluster,
                feature,
                source,
            } => write!(
                f,
                "component for feature {} in cluster {}: {}",
                feature, cluster, source
            ),
            Self::Partition(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for MixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Construction(err) => Some(err),
            Self::Component { source, .. } => Some(source),
            Self::Partition(err) => Some(err),
            _ => None,
        }
    }
}
