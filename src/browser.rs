//! DOM host for the browser build.

use crate::behavior::Behavior;
use crate::config::BehaviorConfig;
use crate::contact::SubmissionSink;
use crate::models::Submission;
use crate::page::{submits_value, NodeId, Page, Task, TimerId};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::{warn, Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions, Window,
};

/// `<script type="application/json" id="folio-config">` holding overrides.
const CONFIG_ELEMENT_ID: &str = "folio-config";

/// [`Page`] over the live document. Elements are registered on first
/// lookup and addressed by index afterwards.
#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
    nodes: Rc<RefCell<Vec<Element>>>,
}

impl WebPage {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            nodes: Rc::default(),
        })
    }

    pub fn element(&self, node: NodeId) -> Element {
        self.nodes.borrow()[node.0].clone()
    }

    fn register(&self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(index) = nodes.iter().position(|known| known == &element) {
            return NodeId(index);
        }
        nodes.push(element);
        NodeId(nodes.len() - 1)
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node).dyn_into::<HtmlElement>().ok()
    }

    fn is_loaded(&self) -> bool {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "complete")
    }

    fn config(&self) -> BehaviorConfig {
        self.document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .map(|raw| BehaviorConfig::from_json_or_default(&raw))
            .unwrap_or_default()
    }
}

impl Page for WebPage {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let element = self.document.query_selector(selector).ok().flatten()?;
        Some(self.register(element))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn query_within(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let element = self.element(scope).query_selector(selector).ok().flatten()?;
        Some(self.register(element))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.register(element))
    }

    fn body(&self) -> Option<NodeId> {
        let body = self.document.body()?;
        Some(self.register(body.into()))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).get_attribute(name)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).class_list().contains(class)
    }

    fn add_class(&self, node: NodeId, class: &str) {
        let _ = self.element(node).class_list().add_1(class);
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        let _ = self.element(node).class_list().remove_1(class);
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.html(node)
            .and_then(|html| html.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let Some(html) = self.html(node) else {
            return;
        };
        let style = html.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if result.is_err() {
            warn!(property, value, "failed to set inline style");
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).text_content().unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.element(node).set_text_content(Some(text));
    }

    fn viewport_top(&self, node: NodeId) -> f64 {
        self.element(node).get_bounding_client_rect().top()
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        match self.html(node) {
            Some(html) => f64::from(html.offset_top()),
            None => self.viewport_top(node) + self.scroll_y(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default()
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn form_fields(&self, form: NodeId) -> Vec<(String, String)> {
        let Ok(form) = self.element(form).dyn_into::<HtmlFormElement>() else {
            return Vec::new();
        };
        let controls = form.elements();
        (0..controls.length())
            .filter_map(|i| controls.item(i))
            .filter_map(|control| control_entry(&control))
            .filter(|(name, _)| !name.is_empty())
            .collect()
    }

    fn reset_form(&self, form: NodeId) {
        if let Ok(form) = self.element(form).dyn_into::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let page = self.clone();
        let callback = Closure::once_into_js(move || task(&page));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => TimerId(handle as u64),
            Err(_) => {
                warn!(?delay, "failed to schedule timer");
                TimerId(0)
            }
        }
    }

    fn cancel(&self, timer: TimerId) {
        self.window.clear_timeout_with_handle(timer.0 as i32);
    }
}

/// Name and value of a control that contributes to form data.
fn control_entry(control: &Element) -> Option<(String, String)> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        let kind = input.type_();
        return submits_value("input", Some(&kind), input.disabled(), input.checked())
            .then(|| (input.name(), input.value()));
    }
    if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        return submits_value("textarea", None, area.disabled(), false)
            .then(|| (area.name(), area.value()));
    }
    if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        return submits_value("select", None, select.disabled(), false)
            .then(|| (select.name(), select.value()));
    }
    None
}

/// Buffers one formatted event and hands it to the console method that
/// matches its level when dropped.
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let line = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Routes `tracing` events to the browser console. The clock is left out
/// because `SystemTime` is unavailable in the browser.
fn init_console_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(Level::INFO)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Writes submissions to the browser console.
pub struct ConsoleSink;

impl SubmissionSink for ConsoleSink {
    fn submit(&self, submission: &Submission) {
        let payload = serde_json::to_string(submission).unwrap_or_default();
        web_sys::console::log_2(
            &JsValue::from_str("Form submitted:"),
            &JsValue::from_str(&payload),
        );
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        warn!(event, "failed to register listener");
    }
    closure.forget();
}

type Shared = Rc<RefCell<Behavior<WebPage>>>;

/// Runs `action` unless the behavior is already busy with another event.
fn with_behavior(behavior: &Shared, action: impl FnOnce(&mut Behavior<WebPage>)) {
    match behavior.try_borrow_mut() {
        Ok(mut behavior) => action(&mut behavior),
        Err(_) => warn!("event dropped while another handler was running"),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_console_tracing();
    let page = WebPage::new().ok_or_else(|| JsValue::from_str("no window or document"))?;
    let config = page.config();
    let anchors = page.query_all(&config.selectors.anchors);

    let behavior = Behavior::attach(page.clone(), config, Box::new(ConsoleSink))
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let hamburger = page.element(behavior.hamburger());
    let nav_links: Vec<Element> = behavior
        .nav_links()
        .iter()
        .map(|&link| page.element(link))
        .collect();
    let form = behavior.contact_form().map(|form| page.element(form));
    let behavior: Shared = Rc::new(RefCell::new(behavior));

    let shared = Rc::clone(&behavior);
    listen(&hamburger, "click", move |_| {
        with_behavior(&shared, |b| {
            b.on_hamburger_click();
        })
    });

    for link in &nav_links {
        let shared = Rc::clone(&behavior);
        listen(link, "click", move |_| {
            with_behavior(&shared, |b| b.on_nav_link_click())
        });
    }

    for anchor in anchors {
        let shared = Rc::clone(&behavior);
        let element = page.element(anchor);
        let href_source = element.clone();
        listen(&element, "click", move |event: Event| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            with_behavior(&shared, |b| {
                if b.on_anchor_click(&href).prevent_default {
                    event.prevent_default();
                }
            })
        });
    }

    if let Some(form) = form {
        let shared = Rc::clone(&behavior);
        listen(&form, "submit", move |event: Event| {
            event.prevent_default();
            with_behavior(&shared, |b| {
                b.on_submit();
            })
        });
    }

    let shared = Rc::clone(&behavior);
    listen(&page.window, "scroll", move |_| {
        with_behavior(&shared, |b| b.on_scroll())
    });

    if page.is_loaded() {
        with_behavior(&behavior, |b| b.on_load());
    } else {
        let shared = Rc::clone(&behavior);
        listen(&page.window, "load", move |_| {
            with_behavior(&shared, |b| b.on_load())
        });
    }

    Ok(())
}
