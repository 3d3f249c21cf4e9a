use crate::config::ResizePolicy;
use crate::geometry::Size;
use crate::layout::PartitionTree;

/// Keeps the root region in step with the viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportResizeHandler {
    policy: ResizePolicy,
}

impl ViewportResizeHandler {
    pub fn new(policy: ResizePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Returns the tree for the new viewport, or `None` when the dimensions
    /// are unusable (negative, NaN or infinite).
    pub fn apply<W: Copy + Eq + Ord>(
        &self,
        tree: &PartitionTree<W>,
        viewport: Size,
    ) -> Option<PartitionTree<W>> {
        if !viewport.is_valid() {
            tracing::debug!(?viewport, "viewport resize ignored: invalid size");
            return None;
        }
        let next = match self.policy {
            ResizePolicy::RootOnly => tree.resize(viewport),
            ResizePolicy::Proportional => tree.relayout(viewport),
        };
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            policy = ?self.policy,
            "viewport resized"
        );
        Some(next)
    }
}
