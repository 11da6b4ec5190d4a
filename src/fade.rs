use crate::page::{NodeId, Page};

/// Staggered entrance animation for content cards. Elements start hidden
/// and are revealed once; scrolling back up never hides them again.
#[derive(Debug, Clone)]
pub struct FadeIn {
    targets: Vec<NodeId>,
    margin: f64,
}

impl FadeIn {
    pub fn new(targets: Vec<NodeId>, margin: f64) -> Self {
        Self { targets, margin }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Puts every target in its hidden starting pose with a transition
    /// delayed by `stagger_ms` per index.
    pub fn prepare(&self, page: &dyn Page, stagger_ms: u64, duration_ms: u64, distance_px: f64) {
        for (index, &node) in self.targets.iter().enumerate() {
            let delay = stagger_ms * index as u64;
            page.set_style(node, "opacity", "0");
            page.set_style(node, "transform", &format!("translateY({distance_px}px)"));
            page.set_style(
                node,
                "transition",
                &format!(
                    "opacity {duration_ms}ms ease {delay}ms, transform {duration_ms}ms ease {delay}ms"
                ),
            );
        }
    }

    /// Reveals targets whose top edge is above the viewport bottom minus
    /// the margin.
    pub fn reveal(&self, page: &dyn Page) {
        let line = page.viewport_height() - self.margin;
        for &node in &self.targets {
            if page.viewport_top(node) < line {
                page.set_style(node, "opacity", "1");
                page.set_style(node, "transform", "translateY(0)");
            }
        }
    }
}

pub fn is_visible(page: &dyn Page, node: NodeId) -> bool {
    page.style(node, "opacity") == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, MemoryPage};

    #[test]
    fn prepare_staggers_transition_by_index() {
        let page = MemoryPage::new(800.0);
        let cards: Vec<_> = (0..3)
            .map(|i| page.insert(ElementSpec::new("div").class("project-card").at(1000.0 + 200.0 * i as f64)))
            .collect();
        let fade = FadeIn::new(cards.clone(), 100.0);
        fade.prepare(&page, 100, 600, 30.0);

        assert_eq!(page.style(cards[0], "opacity"), "0");
        assert_eq!(page.style(cards[1], "transform"), "translateY(30px)");
        assert_eq!(
            page.style(cards[2], "transition"),
            "opacity 600ms ease 200ms, transform 600ms ease 200ms"
        );
    }

    #[test]
    fn reveal_uses_margin_above_viewport_bottom() {
        let page = MemoryPage::new(800.0);
        let inside = page.insert(ElementSpec::new("div").at(1000.0 + 650.0));
        let below = page.insert(ElementSpec::new("div").at(1000.0 + 750.0));
        let fade = FadeIn::new(vec![inside, below], 100.0);
        fade.prepare(&page, 100, 600, 30.0);

        page.set_scroll(1000.0);
        fade.reveal(&page);
        // viewport tops: 650 (height - 150) and 750 (height - 50)
        assert!(is_visible(&page, inside));
        assert!(!is_visible(&page, below));
        assert_eq!(page.style(inside, "transform"), "translateY(0)");
        assert_eq!(page.style(below, "transform"), "translateY(30px)");
    }

    #[test]
    fn reveal_line_is_exclusive() {
        let page = MemoryPage::new(800.0);
        let card = page.insert(ElementSpec::new("div").at(700.0));
        let fade = FadeIn::new(vec![card], 100.0);
        fade.prepare(&page, 100, 600, 30.0);

        fade.reveal(&page);
        assert!(!is_visible(&page, card));
        page.set_scroll(1.0);
        fade.reveal(&page);
        assert!(is_visible(&page, card));
    }

    #[test]
    fn reveal_is_one_way() {
        let page = MemoryPage::new(800.0);
        let card = page.insert(ElementSpec::new("div").at(1200.0));
        let fade = FadeIn::new(vec![card], 100.0);
        fade.prepare(&page, 100, 600, 30.0);

        fade.reveal(&page);
        assert!(!is_visible(&page, card));

        page.set_scroll(800.0);
        fade.reveal(&page);
        assert!(is_visible(&page, card));

        page.set_scroll(0.0);
        fade.reveal(&page);
        assert!(is_visible(&page, card));
    }
}
