use thiserror::Error;

use crate::layout::RegionId;

/// Failures raised by region tree operations.
///
/// The window manager never surfaces these to the host: every error turns
/// into a no-op on the current snapshot and is logged at `debug`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("region {0:?} does not exist")]
    UnknownRegion(RegionId),
    #[error("region {0:?} is not a leaf")]
    NotALeaf(RegionId),
    #[error("region {0:?} is the root and has no sibling")]
    RootHasNoSibling(RegionId),
    #[error("invariant violated at region {region:?}: {reason}")]
    Invariant { region: RegionId, reason: String },
}
