use crate::page::{NodeId, Page, TimerId};
use std::time::Duration;

/// Fades the loading overlay out once the page has loaded, then removes
/// it from layout.
pub fn dismiss_preloader(
    page: &dyn Page,
    preloader: NodeId,
    delay: Duration,
    fade: Duration,
) -> TimerId {
    page.schedule(
        delay,
        Box::new(move |page| {
            page.set_style(preloader, "opacity", "0");
            page.schedule(
                fade,
                Box::new(move |page| page.set_style(preloader, "display", "none")),
            );
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, MemoryPage};

    #[test]
    fn fades_then_hides() {
        let page = MemoryPage::new(800.0);
        let overlay = page.insert(ElementSpec::new("div").class("preloader"));
        dismiss_preloader(
            &page,
            overlay,
            Duration::from_millis(500),
            Duration::from_millis(500),
        );

        page.advance(Duration::from_millis(499));
        assert_eq!(page.style(overlay, "opacity"), "");

        page.advance(Duration::from_millis(1));
        assert_eq!(page.style(overlay, "opacity"), "0");
        assert_eq!(page.style(overlay, "display"), "");

        page.advance(Duration::from_millis(500));
        assert_eq!(page.style(overlay, "display"), "none");
    }
}
