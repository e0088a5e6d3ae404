//! # Option Effect Resolver
//!
//! Computes which arguments of a command are visible for a given selection. Choosing an
//! option of a select argument can hide declared arguments (`remove`) and reveal new ones
//! (`args`). The schema is never touched: every call builds a fresh list.

use crate::{
    core::selection::SelectionState,
    models::{Argument, ArgumentKind, Command, CommandOption, OptionSource, Removal},
};

/// The options a select argument offers, following option-set references.
///
/// A dangling reference (or a non-select argument) yields an empty slice.
pub fn resolve_options<'a>(command: &'a Command, argument: &'a Argument) -> &'a [CommandOption] {
    match &argument.kind {
        ArgumentKind::Select {
            options: OptionSource::Inline(options),
        } => options,
        ArgumentKind::Select {
            options: OptionSource::SetRef(id),
        } => match command.data.iter().find(|set| set.id == *id) {
            Some(set) => &set.options,
            None => {
                log::warn!(
                    "Command {} ('{}'): argument '{}' references missing option set {}.",
                    command.id,
                    command.name,
                    argument.key,
                    id
                );
                &[]
            }
        },
        _ => &[],
    }
}

/// The option currently chosen for `argument`, if any and if it exists.
pub fn selected_option<'a>(
    command: &'a Command,
    argument: &'a Argument,
    selection: &SelectionState,
) -> Option<&'a CommandOption> {
    let value = selection.get(&argument.key)?;
    resolve_options(command, argument)
        .iter()
        .find(|option| option.value == value)
}

/// Where a visible argument came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Declared,
    Revealed,
}

/// Returns the arguments to show for `command` under `selection`, in order.
///
/// Declared select arguments are processed in declaration order. For each one with a chosen
/// option: `remove: true` hides every other declared argument, `remove: <keys>` hides those
/// keys wherever they are, and `args` are appended. A key is visible at most once; a
/// revealed argument replaces an earlier one with the same key. A select argument hidden by
/// an earlier option has no effect of its own.
pub fn resolve_visible_arguments(command: &Command, selection: &SelectionState) -> Vec<Argument> {
    let mut visible: Vec<(Origin, Argument)> = command
        .args
        .iter()
        .map(|arg| (Origin::Declared, arg.clone()))
        .collect();

    for owner in &command.args {
        if !matches!(owner.kind, ArgumentKind::Select { .. }) {
            continue;
        }
        if !visible.iter().any(|(_, a)| a.key == owner.key) {
            log::trace!("Skipping effects of hidden argument '{}'", owner.key);
            continue;
        }
        let Some(option) = selected_option(command, owner, selection) else {
            continue;
        };
        log::debug!(
            "Applying option '{}' of '{}' on command {}",
            option.value,
            owner.key,
            command.id
        );

        match &option.remove {
            Removal::Nothing => {}
            Removal::AllDeclared => {
                visible.retain(|(origin, a)| *origin != Origin::Declared || a.key == owner.key);
            }
            Removal::Keys(keys) => {
                visible.retain(|(_, a)| !keys.contains(&a.key));
            }
        }

        for revealed in &option.args {
            visible.retain(|(_, a)| a.key != revealed.key);
            visible.push((Origin::Revealed, revealed.clone()));
        }
    }

    visible.into_iter().map(|(_, arg)| arg).collect()
}

/// The description to show under an argument.
///
/// When the chosen option reveals arguments, the first one's description describes the
/// choice better than the argument's own text.
pub fn effective_description<'a>(
    command: &'a Command,
    argument: &'a Argument,
    selection: &SelectionState,
) -> &'a str {
    selected_option(command, argument, selection)
        .and_then(|option| option.args.first())
        .map_or(argument.description.as_str(), |first| {
            first.description.as_str()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(args: &[Argument]) -> Vec<&str> {
        args.iter().map(|a| a.key.as_str()).collect()
    }

    fn command(json: &str) -> Command {
        serde_json::from_str(json).unwrap()
    }

    fn mode_command() -> Command {
        command(
            r#"{
                "id": 3, "name": "Spawn", "command": "/spawn <level> <amount> <mode> <x>",
                "args": [
                    {"key": "level", "type": "number"},
                    {"key": "amount", "type": "number"},
                    {"key": "mode", "type": "select", "description": "Spawn mode", "options": [
                        {"value": "solo", "description": "Only the mode", "remove": true},
                        {"value": "extra", "description": "Adds x", "args": [
                            {"key": "x", "type": "number", "description": "Extra count"}
                        ]},
                        {"value": "nolevel", "description": "No level", "remove": "level"},
                        {"value": "plain", "description": "Nothing"}
                    ]}
                ]
            }"#,
        )
    }

    #[test]
    fn test_no_selection_returns_baseline() {
        let cmd = mode_command();
        let visible = resolve_visible_arguments(&cmd, &SelectionState::new());
        assert_eq!(keys(&visible), vec!["level", "amount", "mode"]);
    }

    #[test]
    fn test_remove_all_keeps_only_owner() {
        let cmd = mode_command();
        let state = SelectionState::new().with("mode", "solo");
        assert_eq!(keys(&resolve_visible_arguments(&cmd, &state)), vec!["mode"]);
    }

    #[test]
    fn test_option_args_are_appended_after_owner() {
        let cmd = mode_command();
        let state = SelectionState::new().with("mode", "extra");
        assert_eq!(
            keys(&resolve_visible_arguments(&cmd, &state)),
            vec!["level", "amount", "mode", "x"]
        );
    }

    #[test]
    fn test_remove_single_key() {
        let cmd = mode_command();
        let state = SelectionState::new().with("mode", "nolevel");
        assert_eq!(
            keys(&resolve_visible_arguments(&cmd, &state)),
            vec!["amount", "mode"]
        );
    }

    #[test]
    fn test_unknown_value_and_plain_option_change_nothing() {
        let cmd = mode_command();
        for value in ["plain", "does-not-exist"] {
            let state = SelectionState::new().with("mode", value);
            assert_eq!(
                keys(&resolve_visible_arguments(&cmd, &state)),
                vec!["level", "amount", "mode"]
            );
        }
    }

    #[test]
    fn test_resolution_does_not_touch_schema() {
        let cmd = mode_command();
        let before = cmd.clone();
        let state = SelectionState::new().with("mode", "extra");
        let _ = resolve_visible_arguments(&cmd, &state);
        assert_eq!(cmd, before);
    }

    #[test]
    fn test_option_can_remove_its_own_owner() {
        let cmd = command(
            r#"{"id": 1, "name": "n", "command": "c", "args": [
                {"key": "level", "type": "number"},
                {"key": "mode", "type": "select", "options": [{"value": "once", "remove": ["mode"], "args": [
                    {"key": "x", "type": "string"}
                ]}]}
            ]}"#,
        );
        let state = SelectionState::new().with("mode", "once");
        assert_eq!(keys(&resolve_visible_arguments(&cmd, &state)), vec!["level", "x"]);
    }

    #[test]
    fn test_removing_missing_key_is_noop() {
        let cmd = command(
            r#"{"id": 1, "name": "n", "command": "c", "args": [
                {"key": "a", "type": "select", "options": [{"value": "v", "remove": ["zzz"]}]},
                {"key": "b", "type": "string"}
            ]}"#,
        );
        let state = SelectionState::new().with("a", "v");
        assert_eq!(keys(&resolve_visible_arguments(&cmd, &state)), vec!["a", "b"]);
    }

    #[test]
    fn test_later_option_re_adds_removed_key() {
        let cmd = command(
            r#"{"id": 1, "name": "n", "command": "c", "args": [
                {"key": "first", "type": "select", "options": [{"value": "v", "remove": "target"}]},
                {"key": "target", "type": "string", "description": "old"},
                {"key": "second", "type": "select", "options": [{"value": "w", "args": [
                    {"key": "target", "type": "number", "description": "new"}
                ]}]}
            ]}"#,
        );
        let state = SelectionState::new().with("first", "v").with("second", "w");
        let visible = resolve_visible_arguments(&cmd, &state);
        assert_eq!(keys(&visible), vec!["first", "second", "target"]);
        let target = visible.iter().find(|a| a.key == "target").unwrap();
        assert_eq!(target.description, "new");
    }

    #[test]
    fn test_revealed_argument_replaces_declared_one_with_same_key() {
        let cmd = command(
            r#"{"id": 1, "name": "n", "command": "c", "args": [
                {"key": "kind", "type": "select", "options": [{"value": "v", "args": [
                    {"key": "level", "type": "number", "limit": {"min": 1, "max": 10}}
                ]}]},
                {"key": "level", "type": "number"}
            ]}"#,
        );
        let state = SelectionState::new().with("kind", "v");
        let visible = resolve_visible_arguments(&cmd, &state);
        assert_eq!(keys(&visible), vec!["kind", "level"]);
        assert!(matches!(
            visible[1].kind,
            ArgumentKind::Number { limit: Some(_) }
        ));
    }

    #[test]
    fn test_hidden_select_has_no_effect() {
        let cmd = command(
            r#"{"id": 1, "name": "n", "command": "c", "args": [
                {"key": "first", "type": "select", "options": [{"value": "v", "remove": true}]},
                {"key": "second", "type": "select", "options": [{"value": "w", "args": [
                    {"key": "x", "type": "string"}
                ]}]}
            ]}"#,
        );
        let state = SelectionState::new().with("first", "v").with("second", "w");
        assert_eq!(keys(&resolve_visible_arguments(&cmd, &state)), vec!["first"]);
    }

    #[test]
    fn test_option_set_reference_and_dangling_reference() {
        let cmd = command(
            r#"{"id": 9, "name": "n", "command": "c",
                "data": [{"id": 5, "options": [{"value": "all", "description": "All", "remove": true}]}],
                "args": [
                    {"key": "scope", "type": "select", "options": 5},
                    {"key": "broken", "type": "select", "options": 6},
                    {"key": "rest", "type": "string"}
                ]}"#,
        );
        assert_eq!(resolve_options(&cmd, &cmd.args[0]).len(), 1);
        assert!(resolve_options(&cmd, &cmd.args[1]).is_empty());
        assert!(resolve_options(&cmd, &cmd.args[2]).is_empty());

        let state = SelectionState::new().with("scope", "all").with("broken", "x");
        assert_eq!(keys(&resolve_visible_arguments(&cmd, &state)), vec!["scope"]);
    }

    #[test]
    fn test_effective_description_follows_selected_option() {
        let cmd = mode_command();
        let mode = &cmd.args[2];
        assert_eq!(
            effective_description(&cmd, mode, &SelectionState::new()),
            "Spawn mode"
        );
        let state = SelectionState::new().with("mode", "extra");
        assert_eq!(effective_description(&cmd, mode, &state), "Extra count");
        let state = SelectionState::new().with("mode", "solo");
        assert_eq!(effective_description(&cmd, mode, &state), "Spawn mode");
    }
}
