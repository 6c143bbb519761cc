//! Edit-mode toggle.
//!
//! In edit mode rows can be renamed and dragged; outside it, tapping a row
//! copies its code.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    active: bool,
}

impl EditMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the mode. Returns `true` if it changed.
    pub fn set(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    pub fn allows_reorder(&self) -> bool {
        self.active
    }

    pub fn allows_modify(&self) -> bool {
        self.active
    }

    pub fn allows_copy(&self) -> bool {
        !self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let mut mode = EditMode::default();
        assert!(!mode.is_active());
        assert!(mode.set(true));
        assert!(!mode.set(true));
        assert!(mode.set(false));
    }

    #[test]
    fn test_gated_actions() {
        let mut mode = EditMode::default();
        assert!(mode.allows_copy());
        assert!(!mode.allows_reorder());

        mode.set(true);
        assert!(!mode.allows_copy());
        assert!(mode.allows_reorder());
        assert!(mode.allows_modify());
    }
}
