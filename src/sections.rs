//! Highlights the nav link of the section currently scrolled into.

use crate::models::SectionBox;
use crate::page::{NodeId, Page};

pub const ACTIVE_CLASS: &str = "active";

/// Id of the last section, in document order, whose top minus `lookahead`
/// is at or above `offset`. Sections must be given top to bottom.
pub fn active_section(sections: &[SectionBox], offset: f64, lookahead: f64) -> Option<&str> {
    let mut current = None;
    for section in sections {
        if offset >= section.top - lookahead {
            current = Some(section.id.as_str());
        }
    }
    current
}

/// Reads the current geometry of `nodes`. Sections without an id are
/// skipped.
pub fn measure_sections(page: &dyn Page, nodes: &[NodeId]) -> Vec<SectionBox> {
    nodes
        .iter()
        .filter_map(|&node| {
            let id = page.attribute(node, "id").filter(|id| !id.is_empty())?;
            Some(SectionBox {
                id,
                top: page.offset_top(node),
            })
        })
        .collect()
}

/// Leaves `active` on the link pointing at `#active` and nowhere else.
pub fn highlight_nav(page: &dyn Page, links: &[NodeId], active: Option<&str>) {
    let target = active.map(|id| format!("#{id}"));
    for &link in links {
        let matches = target.is_some() && page.attribute(link, "href") == target;
        page.set_class(link, ACTIVE_CLASS, matches);
    }
}
