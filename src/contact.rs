//! Contact form that only pretends to send.
//!
//! Field values are handed to a [`SubmissionSink`]; where they actually
//! go is up to the integrating application.

use crate::models::Submission;
use crate::page::{NodeId, Page, TimerId};
use std::time::Duration;
use tracing::{info, warn};

pub trait SubmissionSink {
    fn submit(&self, submission: &Submission);
}

/// Reports submissions through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&self, submission: &Submission) {
        match serde_json::to_string(submission) {
            Ok(fields) => info!(%fields, "contact form submitted"),
            Err(err) => warn!("failed to encode submission: {err}"),
        }
    }
}

/// Success indication shown on the submit button.
#[derive(Debug, Clone)]
pub struct SuccessStyle {
    pub label: String,
    pub background: String,
    pub revert_after: Duration,
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub submission: Submission,
    pub restore: Option<TimerId>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactForm {
    pub form: NodeId,
    pub button: Option<NodeId>,
}

impl ContactForm {
    pub fn new(page: &dyn Page, form: NodeId, button_selector: &str) -> Self {
        Self {
            form,
            button: page.query_within(form, button_selector),
        }
    }

    /// Captures and reports the fields, clears the form and flashes the
    /// success style on the button. The label captured here is restored
    /// when the timer fires; overlapping submissions each keep their own
    /// timer.
    pub fn submit(
        &self,
        page: &dyn Page,
        sink: &dyn SubmissionSink,
        success: &SuccessStyle,
    ) -> SubmitOutcome {
        let submission: Submission = page.form_fields(self.form).into_iter().collect();
        sink.submit(&submission);

        let restore = self.button.map(|button| {
            let original = page.text(button);
            page.set_text(button, &success.label);
            page.set_style(button, "background", &success.background);
            page.schedule(
                success.revert_after,
                Box::new(move |page| {
                    page.set_text(button, &original);
                    page.set_style(button, "background", "");
                }),
            )
        });
        page.reset_form(self.form);

        SubmitOutcome {
            submission,
            restore,
        }
    }
}
