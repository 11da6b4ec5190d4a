//! The capability surface the behavior needs from its host page.
//!
//! Everything the behavior does to the document goes through [`Page`], so
//! the same logic drives the real DOM in the browser and the in-memory
//! page in tests.

use std::time::Duration;

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Deferred work; the host hands itself back when the timer fires.
pub type Task = Box<dyn FnOnce(&dyn Page)>;

pub trait Page {
    fn query(&self, selector: &str) -> Option<NodeId>;
    /// All matches, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: NodeId, selector: &str) -> Option<NodeId>;
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    fn body(&self) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);

    /// Inline style value, empty when unset.
    fn style(&self, node: NodeId, property: &str) -> String;
    /// An empty `value` clears the inline property.
    fn set_style(&self, node: NodeId, property: &str, value: &str);
    fn text(&self, node: NodeId) -> String;
    fn set_text(&self, node: NodeId, text: &str);

    /// Top edge relative to the viewport.
    fn viewport_top(&self, node: NodeId) -> f64;
    /// Top edge relative to the document.
    fn offset_top(&self, node: NodeId) -> f64;
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Requests an animated scroll. Completion is up to the host.
    fn scroll_to(&self, top: f64);

    /// Named, successful controls of a form as `(name, value)` pairs.
    fn form_fields(&self, form: NodeId) -> Vec<(String, String)>;
    fn reset_form(&self, form: NodeId);

    fn schedule(&self, delay: Duration, task: Task) -> TimerId;
    fn cancel(&self, timer: TimerId);

    fn set_class(&self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }
}

/// Whether a form control contributes its value to form data. `kind` is
/// the `type` of an `<input>`; other tags ignore it.
pub fn submits_value(tag: &str, kind: Option<&str>, disabled: bool, checked: bool) -> bool {
    if disabled {
        return false;
    }
    match tag {
        "input" => match kind.unwrap_or("text") {
            "submit" | "button" | "reset" | "image" | "file" => false,
            "checkbox" | "radio" => checked,
            _ => true,
        },
        "textarea" | "select" => true,
        _ => false,
    }
}
