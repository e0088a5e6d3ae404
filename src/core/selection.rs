// src/core/selection.rs

use crate::{
    constants::{NONE_SELECTED, SLIDER_TOGGLE_SUFFIX},
    core::{interpolator::ValueSource, resolver},
    models::{Argument, ArgumentKind, Command},
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised while reading user-typed `key=value` assignments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Assignment '{0}' is missing '=' (expected key=value).")]
    MissingEquals(String),
    #[error("Assignment '{0}' has an empty key.")]
    EmptyKey(String),
}

/// The values a user has chosen or typed for one command's arguments.
///
/// Which input widget a number argument uses is kept apart from its value, so the
/// widget toggle can never leak into a rendered command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    values: BTreeMap<String, String>,
    sliders: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value for `key`.
    ///
    /// - `none-selected` clears the key.
    /// - `<key>-useSlider` toggles the slider for `<key>` (`"true"` turns it on).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(base) = key.strip_suffix(SLIDER_TOGGLE_SUFFIX) {
            self.set_slider(base, value == "true");
            return;
        }
        if value == NONE_SELECTED {
            log::trace!("Clearing selection for '{}'", key);
            self.values.remove(&key);
            return;
        }
        self.values.insert(key, value);
    }

    /// Functional variant of [`Self::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn set_slider(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.sliders.insert(key.to_string());
        } else {
            self.sliders.remove(key);
        }
    }

    pub fn uses_slider(&self, key: &str) -> bool {
        self.sliders.contains(key)
    }

    /// Builds a state from raw `key=value` strings, e.g. the CLI's repeated `--set`.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::new();
        for raw in assignments {
            let (key, value) = parse_assignment(raw.as_ref())?;
            state.set(key, value);
        }
        Ok(state)
    }
}

impl ValueSource for SelectionState {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

/// Splits `key=value` at the first `=`. The value may be empty; the key may not.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str), SelectionError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| SelectionError::MissingEquals(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SelectionError::EmptyKey(raw.to_string()));
    }
    Ok((key, value))
}

// --- VALIDATION ---

/// A value that does not fit its argument. Reported to the user, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionIssue {
    #[error("'{key}' expects a whole number, got '{value}'.")]
    NotANumber { key: String, value: String },
    #[error("'{key}' must be between {min} and {max}, got {value}.")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("'{value}' is not one of the options of '{key}'.")]
    UnknownOption { key: String, value: String },
}

/// Checks the non-empty values of the visible arguments against their declared types.
pub fn validate_selection(
    command: &Command,
    visible: &[Argument],
    selection: &SelectionState,
) -> Vec<SelectionIssue> {
    let mut issues = Vec::new();

    for arg in visible {
        let Some(value) = selection.get(&arg.key).filter(|v| !v.is_empty()) else {
            continue;
        };

        match &arg.kind {
            ArgumentKind::Number { limit } => match value.trim().parse::<i64>() {
                Err(_) => issues.push(SelectionIssue::NotANumber {
                    key: arg.key.clone(),
                    value: value.to_string(),
                }),
                Ok(n) => {
                    if let Some(limit) = limit
                        && !limit.contains(n)
                    {
                        issues.push(SelectionIssue::OutOfRange {
                            key: arg.key.clone(),
                            value: n,
                            min: limit.min,
                            max: limit.max,
                        });
                    }
                }
            },
            ArgumentKind::Select { .. } => {
                let options = resolver::resolve_options(command, arg);
                // Nothing to check against when the option list failed to resolve.
                if !options.is_empty() && !options.iter().any(|o| o.value == value) {
                    issues.push(SelectionIssue::UnknownOption {
                        key: arg.key.clone(),
                        value: value.to_string(),
                    });
                }
            }
            ArgumentKind::Search { .. } | ArgumentKind::Text | ArgumentKind::Unsupported => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        serde_json::from_str(
            r#"{
                "id": 1, "name": "Give", "command": "/give <item> x<amount> <mode>",
                "data": [{"id": 1, "options": [{"value": "a", "description": "A"}]}],
                "args": [
                    {"key": "item", "type": "search"},
                    {"key": "amount", "type": "number", "limit": {"min": 1, "max": 99}},
                    {"key": "mode", "type": "select", "options": 1},
                    {"key": "ghost", "type": "select", "options": 42}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_none_selected_clears_value() {
        let mut state = SelectionState::new().with("mode", "a");
        assert_eq!(state.get("mode"), Some("a"));
        state.set("mode", NONE_SELECTED);
        assert_eq!(state.get("mode"), None);
    }

    #[test]
    fn test_slider_toggle_is_kept_out_of_values() {
        let mut state = SelectionState::new();
        state.set("amount-useSlider", "true");
        state.set("amount", "5");
        assert!(state.uses_slider("amount"));
        assert_eq!(state.values().len(), 1);
        assert_eq!(state.lookup("amount-useSlider"), None);

        state.set("amount-useSlider", "false");
        assert!(!state.uses_slider("amount"));
        assert_eq!(state.get("amount"), Some("5"));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("item=501024"), Ok(("item", "501024")));
        assert_eq!(parse_assignment("msg=a=b"), Ok(("msg", "a=b")));
        assert_eq!(parse_assignment("note="), Ok(("note", "")));
        assert_eq!(
            parse_assignment("item"),
            Err(SelectionError::MissingEquals("item".to_string()))
        );
        assert_eq!(
            parse_assignment(" =5"),
            Err(SelectionError::EmptyKey(" =5".to_string()))
        );
    }

    #[test]
    fn test_from_assignments_applies_in_order() {
        let state =
            SelectionState::from_assignments(["amount=5", "amount=7", "mode=a"]).unwrap();
        assert_eq!(state.get("amount"), Some("7"));
        assert_eq!(state.get("mode"), Some("a"));
        assert!(SelectionState::from_assignments(["broken"]).is_err());
    }

    #[test]
    fn test_validate_number_limits() {
        let cmd = command();
        let state = SelectionState::new().with("amount", "120");
        let issues = validate_selection(&cmd, &cmd.args, &state);
        assert_eq!(
            issues,
            vec![SelectionIssue::OutOfRange {
                key: "amount".to_string(),
                value: 120,
                min: 1,
                max: 99
            }]
        );

        let state = SelectionState::new().with("amount", "lots");
        let issues = validate_selection(&cmd, &cmd.args, &state);
        assert!(matches!(&issues[0], SelectionIssue::NotANumber { key, .. } if key == "amount"));

        let state = SelectionState::new().with("amount", "99");
        assert!(validate_selection(&cmd, &cmd.args, &state).is_empty());
    }

    #[test]
    fn test_validate_select_options() {
        let cmd = command();
        let state = SelectionState::new().with("mode", "z").with("ghost", "anything");
        let issues = validate_selection(&cmd, &cmd.args, &state);
        // `ghost` points at a missing option set, so it has nothing to validate against.
        assert_eq!(
            issues,
            vec![SelectionIssue::UnknownOption {
                key: "mode".to_string(),
                value: "z".to_string()
            }]
        );
    }

    #[test]
    fn test_validate_ignores_hidden_arguments() {
        let cmd = command();
        let state = SelectionState::new().with("amount", "0");
        let visible: Vec<Argument> = cmd.args.iter().filter(|a| a.key != "amount").cloned().collect();
        assert!(validate_selection(&cmd, &visible, &state).is_empty());
    }
}
