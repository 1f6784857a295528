#[cfg(feature = "network")]
pub mod cache;
pub mod dataset;
pub mod error;
pub mod export;
pub mod model;
pub mod score;
#[cfg(feature = "network")]
pub mod sync;
pub mod weights;

pub use dataset::Dataset;
pub use error::ScoutError;
pub use model::{Entity, Factor};
pub use score::{normalize, score, FactorScores, NormalizationRange, ScoredEntity};
pub use weights::WeightSet;
