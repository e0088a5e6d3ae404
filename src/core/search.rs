//! # Search
//!
//! Two kinds of search live here: the local filter over a catalog's commands, and the
//! request body sent to the remote handbook when a `search` argument is being filled.

use crate::{
    constants::DEFAULT_SEARCH_LIMIT,
    core::resolver,
    models::{ArgumentKind, BodyValue, Command, Game, SearchApi, SearchCandidate},
};
use serde::{Deserialize, Serialize};

/// Returns the commands matching `query`, in catalog order.
///
/// Matching is a case-insensitive substring test over the command name and template,
/// every argument name, and the values and descriptions of select options. An empty
/// query matches everything.
pub fn filter_commands<'a>(commands: &'a [Command], query: &str) -> Vec<&'a Command> {
    if query.is_empty() {
        return commands.iter().collect();
    }
    let needle = query.to_lowercase();
    commands
        .iter()
        .filter(|command| command_matches(command, &needle))
        .collect()
}

fn command_matches(command: &Command, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    if hit(&command.name) || hit(&command.command) {
        return true;
    }

    command.args.iter().any(|arg| {
        hit(&arg.name)
            || (matches!(arg.kind, ArgumentKind::Select { .. })
                && resolver::resolve_options(command, arg)
                    .iter()
                    .any(|option| hit(&option.value) || hit(&option.description)))
    })
}

/// Body of a remote handbook search.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    #[serde(skip)]
    pub game: Game,
    pub search: Vec<String>,
    pub limit: u32,
    pub category: Vec<String>,
    pub command: bool,
}

impl SearchRequest {
    /// Builds the request for the `search` argument `key` from its body template.
    ///
    /// Every body value (or list element) spelled exactly like `key` is replaced by `query`.
    pub fn for_argument(api: &SearchApi, key: &str, query: &str) -> Self {
        let substituted = |value: &BodyValue| -> Vec<String> {
            let swap = |v: &String| if v == key { query.to_string() } else { v.clone() };
            match value {
                BodyValue::Text(v) => vec![swap(v)],
                BodyValue::List(items) => items.iter().map(swap).collect(),
                BodyValue::Number(n) => vec![n.to_string()],
            }
        };
        let field = |name: &str| {
            api.json_body
                .get(name)
                .map(&substituted)
                .unwrap_or_default()
        };

        let limit = field("limit")
            .first()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_SEARCH_LIMIT);

        Self {
            game: api.game,
            search: field("search"),
            limit,
            category: field("category"),
            command: false,
        }
    }

    /// The JSON body as it goes over the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The handbook answers with either a bare list or a `{ "data": [...] }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateReply {
    List(Vec<SearchCandidate>),
    Envelope { data: Vec<SearchCandidate> },
}

/// Reads the candidates out of a handbook search reply. Only `id` becomes a selection value.
pub fn parse_candidates(body: &str) -> serde_json::Result<Vec<SearchCandidate>> {
    let reply: CandidateReply = serde_json::from_str(body)?;
    Ok(match reply {
        CandidateReply::List(items) | CandidateReply::Envelope { data: items } => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Command> {
        serde_json::from_str(
            r#"[
                {"id": 1, "name": "Heal all", "command": "/heal"},
                {"id": 2, "name": "Give item", "command": "/give <item> x<amount>", "args": [
                    {"key": "item", "name": "Item", "type": "search"}
                ]},
                {"id": 3, "name": "Set weather", "command": "/weather <w>",
                    "data": [{"id": 1, "options": [{"value": "rain", "description": "Heavy Rain"}]}],
                    "args": [{"key": "w", "name": "Weather", "type": "select", "options": 1}]},
                {"id": 4, "name": "Quest", "command": "/q <action>", "args": [
                    {"key": "action", "name": "Action", "type": "select", "options": [
                        {"value": "finish", "description": "Finish quest"}
                    ]}
                ]}
            ]"#,
        )
        .unwrap()
    }

    fn ids(found: &[&Command]) -> Vec<u32> {
        found.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let cmds = catalog();
        assert_eq!(ids(&filter_commands(&cmds, "")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_whitespace_is_part_of_the_query() {
        let cmds: Vec<Command> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Heal", "command": "/heal"},
                {"id": 2, "name": "Give item", "command": "/give"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ids(&filter_commands(&cmds, " ")), vec![2]);
        assert!(filter_commands(&cmds, "heal ").is_empty());
    }

    #[test]
    fn test_query_matches_name_and_template() {
        let cmds = catalog();
        assert_eq!(ids(&filter_commands(&cmds, "heal")), vec![1]);
        assert_eq!(ids(&filter_commands(&cmds, "/GIVE")), vec![2]);
        assert_eq!(ids(&filter_commands(&cmds, "item")), vec![2]);
    }

    #[test]
    fn test_query_matches_option_values_and_set_references() {
        let cmds = catalog();
        assert_eq!(ids(&filter_commands(&cmds, "heavy rain")), vec![3]);
        assert_eq!(ids(&filter_commands(&cmds, "FINISH")), vec![4]);
        assert!(filter_commands(&cmds, "nothing-like-this").is_empty());
    }

    #[test]
    fn test_search_request_substitutes_query() {
        let api: SearchApi = serde_json::from_str(
            r#"{"game": "sr", "jsonBody": {"search": ["item"], "limit": "25", "category": ["Weapons", "item"]}}"#,
        )
        .unwrap();
        let request = SearchRequest::for_argument(&api, "item", "sword");
        assert_eq!(request.game, Game::StarRail);
        assert_eq!(request.search, vec!["sword"]);
        assert_eq!(request.limit, 25);
        assert_eq!(request.category, vec!["Weapons", "sword"]);
        assert!(!request.command);

        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(json["command"], false);
        assert!(json.get("game").is_none());
    }

    #[test]
    fn test_numeric_limit_is_accepted() {
        let api: SearchApi =
            serde_json::from_str(r#"{"game": "gi", "jsonBody": {"search": "item", "limit": 40}}"#)
                .unwrap();
        let request = SearchRequest::for_argument(&api, "item", "Amber");
        assert_eq!(request.limit, 40);
        assert_eq!(request.search, vec!["Amber"]);
    }

    #[test]
    fn test_search_request_limit_falls_back_to_default() {
        for body in [r#"{}"#, r#"{"limit": "many"}"#, r#"{"limit": "0"}"#] {
            let api: SearchApi =
                serde_json::from_str(&format!(r#"{{"game": "gi", "jsonBody": {}}}"#, body)).unwrap();
            let request = SearchRequest::for_argument(&api, "item", "q");
            assert_eq!(request.limit, DEFAULT_SEARCH_LIMIT);
            assert!(request.search.is_empty());
        }
    }

    #[test]
    fn test_parse_candidates_accepts_both_reply_shapes() {
        let bare = parse_candidates(r#"[{"id": "501024", "name": "Sword"}]"#).unwrap();
        assert_eq!(bare[0].id, "501024");
        assert_eq!(bare[0].description, None);

        let wrapped = parse_candidates(
            r#"{"data": [{"id": "1", "name": "Relic", "description": "Set piece", "image": "r.png"}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].image.as_deref(), Some("r.png"));

        assert!(parse_candidates(r#"{"items": []}"#).is_err());
    }

    #[test]
    fn test_parse_candidates_reads_localized_fields() {
        let hits = parse_candidates(
            r#"[{"id": 23001, "name": {"en": "Relic"}, "description": {"en": "Set piece"}, "image": {"icon": "s.png"}}]"#,
        )
        .unwrap();
        assert_eq!(hits[0].id, "23001");
        assert_eq!(hits[0].description.as_deref(), Some("Set piece"));
        assert_eq!(hits[0].image.as_deref(), Some("s.png"));
    }
}
