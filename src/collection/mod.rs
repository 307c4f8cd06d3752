//! Provider collection and its depth-ordered registry

/// Locked provider collection with incremental recomposition
pub mod compositor;
/// Generational, layer-sorted provider registry
pub mod registry;

pub use compositor::{ProviderCollection, Providers};
pub use registry::{ProviderId, Registry};
