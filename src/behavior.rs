//! Page session: element references captured once, plus one entry point
//! per browser event.

use crate::anchor::follow_anchor;
use crate::config::BehaviorConfig;
use crate::contact::{ContactForm, SubmissionSink, SubmitOutcome, SuccessStyle};
use crate::errors::SetupError;
use crate::fade::FadeIn;
use crate::header::{apply_header, HeaderTracker};
use crate::models::{AnchorOutcome, HeaderState};
use crate::nav::NavMenu;
use crate::page::{NodeId, Page};
use crate::preloader::dismiss_preloader;
use crate::sections::{active_section, highlight_nav, measure_sections};
use tracing::{debug, info};

pub struct Behavior<P: Page> {
    page: P,
    config: BehaviorConfig,
    sink: Box<dyn SubmissionSink>,
    header: NodeId,
    tracker: HeaderTracker,
    nav: NavMenu,
    nav_links: Vec<NodeId>,
    sections: Vec<NodeId>,
    fade: FadeIn,
    contact: Option<ContactForm>,
    preloader: Option<NodeId>,
    active: Option<String>,
}

impl<P: Page> Behavior<P> {
    /// Looks up the page elements and puts fade targets in their hidden
    /// pose. Header, hamburger and nav menu are required; everything else
    /// is optional and its feature is skipped when absent.
    pub fn attach(
        page: P,
        config: BehaviorConfig,
        sink: Box<dyn SubmissionSink>,
    ) -> Result<Self, SetupError> {
        let selectors = &config.selectors;
        let required = |element: &'static str, selector: &str| {
            page.query(selector)
                .ok_or_else(|| SetupError::missing(element, selector))
        };

        let header = required("header", &selectors.header)?;
        let nav = NavMenu {
            hamburger: required("hamburger", &selectors.hamburger)?,
            menu: required("nav menu", &selectors.nav_menu)?,
            body: page.body(),
        };
        let nav_links = page.query_all(&selectors.nav_links);
        let sections = page.query_all(&selectors.sections);
        let contact = page
            .query(&selectors.contact_form)
            .map(|form| ContactForm::new(&page, form, &selectors.submit_button));
        let preloader = page.query(&selectors.preloader);

        let fade = FadeIn::new(page.query_all(&selectors.fade_targets), config.reveal_margin);
        fade.prepare(
            &page,
            config.fade_stagger_ms,
            config.fade_duration_ms,
            config.fade_distance_px,
        );

        info!(
            nav_links = nav_links.len(),
            sections = sections.len(),
            fade_targets = fade.targets().len(),
            contact_form = contact.is_some(),
            preloader = preloader.is_some(),
            "page behavior attached"
        );

        Ok(Self {
            tracker: HeaderTracker::new(config.scrolled_threshold),
            page,
            config,
            sink,
            header,
            nav,
            nav_links,
            sections,
            fade,
            contact,
            preloader,
            active: None,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn hamburger(&self) -> NodeId {
        self.nav.hamburger
    }

    pub fn nav_links(&self) -> &[NodeId] {
        &self.nav_links
    }

    pub fn contact_form(&self) -> Option<NodeId> {
        self.contact.map(|contact| contact.form)
    }

    pub fn header_state(&self) -> HeaderState {
        self.tracker.state()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.nav.is_open(&self.page)
    }

    pub fn on_load(&mut self) {
        self.refresh_active();
        self.fade.reveal(&self.page);
        if let Some(preloader) = self.preloader {
            dismiss_preloader(
                &self.page,
                preloader,
                self.config.preloader_delay(),
                self.config.preloader_fade(),
            );
        }
    }

    pub fn on_scroll(&mut self) {
        let offset = self.page.scroll_y();
        let state = self.tracker.observe(offset);
        apply_header(&self.page, self.header, state);
        self.refresh_active();
        self.fade.reveal(&self.page);
    }

    pub fn on_hamburger_click(&mut self) -> bool {
        self.nav.toggle(&self.page)
    }

    pub fn on_nav_link_click(&mut self) {
        self.nav.close(&self.page);
    }

    pub fn on_anchor_click(&mut self, href: &str) -> AnchorOutcome {
        follow_anchor(&self.page, href, self.config.header_offset)
    }

    /// `None` when the page has no contact form.
    pub fn on_submit(&mut self) -> Option<SubmitOutcome> {
        let contact = self.contact?;
        let success = SuccessStyle {
            label: self.config.submit_success_label.clone(),
            background: self.config.submit_success_color.clone(),
            revert_after: self.config.submit_revert(),
        };
        Some(contact.submit(&self.page, self.sink.as_ref(), &success))
    }

    fn refresh_active(&mut self) {
        let boxes = measure_sections(&self.page, &self.sections);
        let current = active_section(
            &boxes,
            self.page.scroll_y(),
            self.config.section_lookahead,
        );
        highlight_nav(&self.page, &self.nav_links, current);

        if current != self.active.as_deref() {
            debug!(from = ?self.active, to = ?current, "active section changed");
            self.active = current.map(str::to_string);
        }
    }
}
