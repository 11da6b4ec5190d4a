use crate::models::AnchorOutcome;
use crate::page::Page;
use tracing::debug;

/// Absolute scroll destination for a target, leaving room for the fixed
/// header.
pub fn scroll_destination(target_viewport_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    target_viewport_top + scroll_y - header_offset
}

/// Handles a click on a same-page link. Default navigation is always
/// suppressed; a scroll is only requested when the fragment names an
/// element on the page.
pub fn follow_anchor(page: &dyn Page, href: &str, header_offset: f64) -> AnchorOutcome {
    let target = href
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
        .and_then(|id| page.element_by_id(id));

    let scrolled_to = target.map(|node| {
        let top = scroll_destination(page.viewport_top(node), page.scroll_y(), header_offset);
        page.scroll_to(top);
        top
    });
    debug!(href, ?scrolled_to, "anchor clicked");

    AnchorOutcome {
        prevent_default: true,
        scrolled_to,
    }
}
