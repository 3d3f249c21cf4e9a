use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, SNAP_MARGIN};
use crate::geometry::Size;

/// How the region tree reacts to a viewport size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Only the root rectangle follows the viewport. Descendant regions and
    /// docked windows keep their previous geometry and may end up outside the
    /// visible area after a shrink.
    #[default]
    RootOnly,
    /// Every region is re-laid out inside the new root and docked windows are
    /// moved to their leaf's new rectangle.
    Proportional,
}

/// Tunables for the window manager. None of these change algorithm
/// behavior, only the numbers fed into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmConfig {
    pub default_window_size: Size,
    pub snap_margin: f64,
    pub resize_policy: ResizePolicy,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            default_window_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            snap_margin: SNAP_MARGIN,
            resize_policy: ResizePolicy::RootOnly,
        }
    }
}

impl WmConfig {
    pub fn with_default_window_size(mut self, size: Size) -> Self {
        if size.is_valid() {
            self.default_window_size = size;
        }
        self
    }

    pub fn with_snap_margin(mut self, margin: f64) -> Self {
        if margin.is_finite() && margin >= 0.0 {
            self.snap_margin = margin;
        }
        self
    }

    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = WmConfig::default();
        assert_eq!(cfg.default_window_size, Size::new(300.0, 200.0));
        assert_eq!(cfg.snap_margin, 30.0);
        assert_eq!(cfg.resize_policy, ResizePolicy::RootOnly);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let cfg = WmConfig::default()
            .with_snap_margin(-1.0)
            .with_default_window_size(Size::new(f64::NAN, 10.0));
        assert_eq!(cfg, WmConfig::default());
        let cfg = WmConfig::default().with_snap_margin(12.0);
        assert_eq!(cfg.snap_margin, 12.0);
    }
}
