use crate::page::{NodeId, Page};
use tracing::debug;

pub const OPEN_CLASS: &str = "active";

/// Hamburger-driven mobile menu. The page body is scroll-locked while the
/// menu is open.
#[derive(Debug, Clone, Copy)]
pub struct NavMenu {
    pub hamburger: NodeId,
    pub menu: NodeId,
    pub body: Option<NodeId>,
}

impl NavMenu {
    pub fn is_open(&self, page: &dyn Page) -> bool {
        page.has_class(self.menu, OPEN_CLASS)
    }

    /// Flips the menu and returns whether it is now open.
    pub fn toggle(&self, page: &dyn Page) -> bool {
        let open = !self.is_open(page);
        self.set_open(page, open);
        debug!(open, "nav menu toggled");
        open
    }

    pub fn close(&self, page: &dyn Page) {
        self.set_open(page, false);
    }

    fn set_open(&self, page: &dyn Page, open: bool) {
        page.set_class(self.hamburger, OPEN_CLASS, open);
        page.set_class(self.menu, OPEN_CLASS, open);
        if let Some(body) = self.body {
            page.set_style(body, "overflow", if open { "hidden" } else { "" });
        }
    }
}
