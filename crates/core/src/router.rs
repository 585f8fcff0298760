//! Active screen selection.

use crate::types::Tab;

/// Two-state switch between the Users and Roles screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRouter {
    tab: Tab,
}

impl ViewRouter {
    /// Router showing the Users screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently shown screen.
    #[must_use]
    pub const fn current(&self) -> Tab {
        self.tab
    }

    /// Show `tab`, returning the screen shown before.
    pub const fn switch(&mut self, tab: Tab) -> Tab {
        let previous = self.tab;
        self.tab = tab;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_switches_without_guards() {
        let mut router = ViewRouter::new();
        assert_eq!(router.current(), Tab::Users);
        assert_eq!(router.switch(Tab::Roles), Tab::Users);
        assert_eq!(router.switch(Tab::Roles), Tab::Roles);
        assert_eq!(router.current(), Tab::Roles);
    }
}
