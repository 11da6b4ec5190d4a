use serde::ser::{Serialize, SerializeMap, Serializer};

/// Direction phase of the sticky header. The `scrolled` flag in
/// [`HeaderState`] is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPhase {
    #[default]
    AtTop,
    ScrollingDown,
    ScrollingUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    pub phase: HeaderPhase,
    pub scrolled: bool,
}

/// Geometry of one `section[id]`, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
}

/// Field values captured from one contact form submission, in form
/// order. A repeated name keeps its first position and takes the later
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: Vec<(String, String)>,
}

impl Submission {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut submission = Self::default();
        for (name, value) in iter {
            submission.insert(name, value);
        }
        submission
    }
}

/// Encodes as a JSON object whose keys follow form order.
impl Serialize for Submission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What the caller should do with the click event after an anchor click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorOutcome {
    pub prevent_default: bool,
    pub scrolled_to: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_keeps_form_order_and_last_duplicate_value() {
        let submission: Submission = [
            ("name", "A"),
            ("email", "b@x.com"),
            ("name", "B"),
            ("message", "hi"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = submission.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "message"]);
        assert_eq!(submission.get("name"), Some("B"));
        assert_eq!(
            serde_json::to_string(&submission).unwrap(),
            r#"{"name":"B","email":"b@x.com","message":"hi"}"#
        );
    }
}
