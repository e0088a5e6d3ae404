// src/core/preview.rs

use crate::{
    core::{
        interpolator, resolver,
        selection::{self, SelectionIssue, SelectionState},
    },
    models::{Argument, Command},
};

/// Everything the UI shows for one command under the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPreview {
    /// Arguments to render as inputs, in display order.
    pub visible: Vec<Argument>,
    /// The template with every known value substituted.
    pub rendered: String,
    /// Tokens still present in `rendered`; the fields of the confirmation form.
    pub pending: Vec<String>,
    pub issues: Vec<SelectionIssue>,
}

impl CommandPreview {
    pub fn build(command: &Command, selection: &SelectionState) -> Self {
        let visible = resolver::resolve_visible_arguments(command, selection);
        let rendered = interpolator::materialize(&command.command, selection);
        let pending = interpolator::pending_placeholders(&rendered);
        let issues = selection::validate_selection(command, &visible, selection);

        log::debug!(
            "Preview of command {}: {} visible argument(s), {} pending, {} issue(s)",
            command.id,
            visible.len(),
            pending.len(),
            issues.len()
        );

        Self {
            visible,
            rendered,
            pending,
            issues,
        }
    }

    /// True when nothing is left to fill in.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}
