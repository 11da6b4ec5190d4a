//! In-memory host page with a virtual clock.
//!
//! Elements are inserted in document order with a fixed document `top`;
//! `viewport_top` follows from the current scroll offset. Timers only fire
//! when the clock is advanced, which keeps delayed behavior deterministic.

use crate::page::{submits_value, NodeId, Page, Task, TimerId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    top: f64,
    parent: Option<NodeId>,
    value: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Document-relative top edge.
    pub fn at(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    pub fn child_of(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Current value of a form control.
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

#[derive(Debug)]
struct Node {
    spec: ElementSpec,
    styles: BTreeMap<String, String>,
}

impl Node {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.spec.id.clone(),
            "class" if !self.spec.classes.is_empty() => Some(self.spec.classes.join(" ")),
            _ => self.spec.attributes.get(name).cloned(),
        }
    }

    fn matches(&self, conditions: &[Condition]) -> bool {
        conditions.iter().all(|condition| match condition {
            Condition::Tag(tag) => &self.spec.tag == tag,
            Condition::Class(class) => self.spec.classes.iter().any(|c| c == class),
            Condition::Id(id) => self.spec.id.as_deref() == Some(id.as_str()),
            Condition::HasAttr(name) => self.attribute(name).is_some(),
            Condition::AttrEquals(name, value) => {
                self.attribute(name).as_deref() == Some(value.as_str())
            }
            Condition::AttrPrefix(name, prefix) => self
                .attribute(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        })
    }
}

struct Timer {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct Inner {
    nodes: Vec<Node>,
    scroll_y: f64,
    viewport_height: f64,
    now: Duration,
    next_timer: u64,
    timers: Vec<Timer>,
    scroll_requests: Vec<f64>,
}

pub struct MemoryPage {
    inner: RefCell<Inner>,
}

impl MemoryPage {
    /// Creates a page holding only `<body>`.
    pub fn new(viewport_height: f64) -> Self {
        let page = Self {
            inner: RefCell::new(Inner {
                viewport_height,
                ..Inner::default()
            }),
        };
        page.insert(ElementSpec::new("body"));
        page
    }

    pub fn insert(&self, spec: ElementSpec) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(Node {
            spec,
            styles: BTreeMap::new(),
        });
        NodeId(inner.nodes.len() - 1)
    }

    pub fn set_scroll(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y;
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.inner.borrow_mut().nodes[node.0].spec.value = Some(value.to_string());
    }

    pub fn value(&self, node: NodeId) -> Option<String> {
        self.inner.borrow().nodes[node.0].spec.value.clone()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Every destination passed to `scroll_to`, oldest first.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.inner.borrow().scroll_requests.clone()
    }

    /// Moves the clock forward, firing due timers in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(timer) = self.pop_due(target) {
            self.inner.borrow_mut().now = timer.due;
            (timer.task)(self);
        }
        self.inner.borrow_mut().now = target;
    }

    fn pop_due(&self, target: Duration) -> Option<Timer> {
        let mut inner = self.inner.borrow_mut();
        let index = inner
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        Some(inner.timers.remove(index))
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let inner = self.inner.borrow();
        let mut current = inner.nodes[node.0].spec.parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = inner.nodes[parent.0].spec.parent;
        }
        false
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let count = self.inner.borrow().nodes.len();
        (0..count)
            .map(NodeId)
            .filter(|&node| self.is_descendant(node, scope))
            .collect()
    }
}

impl Page for MemoryPage {
    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let groups = parse_selector(selector);
        let inner = self.inner.borrow();
        inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| groups.iter().any(|group| node.matches(group)))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn query_within(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let groups = parse_selector(selector);
        let candidates = self.descendants(scope);
        let inner = self.inner.borrow();
        candidates
            .into_iter()
            .find(|node| groups.iter().any(|group| inner.nodes[node.0].matches(group)))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let inner = self.inner.borrow();
        inner
            .nodes
            .iter()
            .position(|node| node.spec.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn body(&self) -> Option<NodeId> {
        self.query("body")
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner.borrow().nodes[node.0].attribute(name)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.inner.borrow().nodes[node.0]
            .spec
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, node: NodeId, class: &str) {
        let mut inner = self.inner.borrow_mut();
        let classes = &mut inner.nodes[node.0].spec.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        self.inner.borrow_mut().nodes[node.0]
            .spec
            .classes
            .retain(|c| c != class);
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.inner.borrow().nodes[node.0]
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let styles = &mut inner.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.inner.borrow().nodes[node.0].spec.text.clone()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.inner.borrow_mut().nodes[node.0].spec.text = text.to_string();
    }

    fn viewport_top(&self, node: NodeId) -> f64 {
        let inner = self.inner.borrow();
        inner.nodes[node.0].spec.top - inner.scroll_y
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.inner.borrow().nodes[node.0].spec.top
    }

    fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.inner.borrow().viewport_height
    }

    fn scroll_to(&self, top: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.scroll_requests.push(top);
        inner.scroll_y = top.max(0.0);
    }

    fn form_fields(&self, form: NodeId) -> Vec<(String, String)> {
        let controls = self.descendants(form);
        let inner = self.inner.borrow();
        controls
            .into_iter()
            .map(|node| &inner.nodes[node.0])
            .filter(|node| {
                submits_value(
                    &node.spec.tag,
                    node.attribute("type").as_deref(),
                    node.attribute("disabled").is_some(),
                    node.attribute("checked").is_some(),
                )
            })
            .filter_map(|node| {
                let name = node.attribute("name").filter(|name| !name.is_empty())?;
                Some((name, node.spec.value.clone().unwrap_or_default()))
            })
            .collect()
    }

    fn reset_form(&self, form: NodeId) {
        let controls = self.descendants(form);
        let mut inner = self.inner.borrow_mut();
        for node in controls {
            let spec = &mut inner.nodes[node.0].spec;
            if spec.value.is_some() {
                spec.value = Some(spec.attributes.get("value").cloned().unwrap_or_default());
            }
        }
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_timer += 1;
        let id = TimerId(inner.next_timer);
        let due = inner.now + delay;
        inner.timers.push(Timer { id, due, task });
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.inner.borrow_mut().timers.retain(|t| t.id != timer);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Tag(String),
    Class(String),
    Id(String),
    HasAttr(String),
    AttrEquals(String, String),
    AttrPrefix(String, String),
}

/// Parses a comma separated list of compound selectors. Combinators are
/// not supported; use `query_within` for scoping.
fn parse_selector(selector: &str) -> Vec<Vec<Condition>> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(parse_compound)
        .collect()
}

fn parse_compound(raw: &str) -> Vec<Condition> {
    const MARKERS: [char; 3] = ['.', '#', '['];

    let mut conditions = Vec::new();
    let tag_len = raw.find(MARKERS).unwrap_or(raw.len());
    if tag_len > 0 && &raw[..tag_len] != "*" {
        conditions.push(Condition::Tag(raw[..tag_len].to_ascii_lowercase()));
    }

    let mut rest = &raw[tag_len..];
    while let Some(marker) = rest.chars().next() {
        match marker {
            '[' => {
                let end = rest.find(']').unwrap_or(rest.len());
                conditions.push(parse_attribute(&rest[1..end]));
                rest = rest.get(end + 1..).unwrap_or("");
            }
            '.' | '#' => {
                let body = &rest[1..];
                let len = body.find(MARKERS).unwrap_or(body.len());
                let name = body[..len].to_string();
                conditions.push(if marker == '.' {
                    Condition::Class(name)
                } else {
                    Condition::Id(name)
                });
                rest = &body[len..];
            }
            _ => break,
        }
    }
    conditions
}

fn parse_attribute(inner: &str) -> Condition {
    let unquote = |value: &str| value.trim().trim_matches(['"', '\'']).to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        Condition::AttrPrefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = inner.split_once('=') {
        Condition::AttrEquals(name.trim().to_string(), unquote(value))
    } else {
        Condition::HasAttr(inner.trim().to_string())
    }
}
