// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// --- COMMAND CATALOG MODELS (What is read from the `<tab>.json` documents) ---

/// One named, applicable GM command as declared in a catalog document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: u32,
    pub name: String,
    /// The literal template, e.g. `/give <item> x<amount>`.
    pub command: String,
    /// Reusable option sets, referenced by id from select arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<OptionSet>,
    /// The declared baseline of arguments, before any option-driven changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Argument>,
}

/// A named list of options stored once per command.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub id: u32,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// One user-fillable slot in a command template.
///
/// Parsing never fails: an argument whose typed part is malformed (no `type`, a missing
/// required field, a value of the wrong shape) keeps its key and labels and becomes
/// [`ArgumentKind::Unsupported`], so the rest of the command still loads.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "serde_json::Value")]
pub struct Argument {
    /// Placeholder name, appears in the template as `<key>`.
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: ArgumentKind,
}

/// The strict wire shape of [`Argument`].
#[derive(Deserialize)]
struct StrictArgument {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(flatten)]
    kind: ArgumentKind,
}

impl From<serde_json::Value> for Argument {
    fn from(value: serde_json::Value) -> Self {
        match serde_json::from_value::<StrictArgument>(value.clone()) {
            Ok(strict) => Self {
                key: strict.key,
                name: strict.name,
                description: strict.description,
                kind: strict.kind,
            },
            Err(e) => {
                let text = |field: &str| {
                    value
                        .get(field)
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                log::warn!("Argument '{}' is malformed, leaving it empty: {}", text("key"), e);
                Self {
                    key: text("key"),
                    name: text("name"),
                    description: text("description"),
                    kind: ArgumentKind::Unsupported,
                }
            }
        }
    }
}

/// The typed part of an argument, discriminated by the JSON `type` field.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArgumentKind {
    Select {
        #[serde(default, deserialize_with = "de_options")]
        options: OptionSource,
    },
    Search {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api: Option<SearchApi>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<Limit>,
    },
    #[serde(rename = "string")]
    Text,
    /// Any `type` this crate does not know. Renders as an empty slot.
    #[serde(other)]
    Unsupported,
}

impl ArgumentKind {
    /// The `type` string as it appears in catalog documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Search { .. } => "search",
            Self::Number { .. } => "number",
            Self::Text => "string",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Where a select argument gets its options from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionSource {
    Inline(Vec<CommandOption>),
    /// Id of an [`OptionSet`] in the owning command's `data`.
    SetRef(u32),
}

impl Default for OptionSource {
    fn default() -> Self {
        Self::Inline(Vec::new())
    }
}

/// `"options": null` reads as no options.
fn de_options<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<OptionSource, D::Error> {
    Ok(Option::<OptionSource>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inclusive bounds for a number argument.
///
/// Values are whole numbers, so fractional bounds are narrowed to the integers they admit.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    #[serde(deserialize_with = "de_lower_bound")]
    pub min: i64,
    #[serde(deserialize_with = "de_upper_bound")]
    pub max: i64,
}

fn de_lower_bound<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let bound = serde_json::Number::deserialize(deserializer)?;
    Ok(bound
        .as_i64()
        .unwrap_or_else(|| bound.as_f64().unwrap_or_default().ceil() as i64))
}

fn de_upper_bound<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let bound = serde_json::Number::deserialize(deserializer)?;
    Ok(bound
        .as_i64()
        .unwrap_or_else(|| bound.as_f64().unwrap_or_default().floor() as i64))
}

impl Limit {
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One selectable choice for a select argument.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Removal::is_nothing")]
    pub remove: Removal,
    /// Arguments that become visible when this option is chosen.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Argument>,
}

/// Which arguments an option hides when chosen.
///
/// Catalogs write this as `true`, a single key, or a list of keys.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "RawRemoval", into = "RawRemoval")]
pub enum Removal {
    #[default]
    Nothing,
    /// Hide every declared argument except the one owning the option.
    AllDeclared,
    Keys(Vec<String>),
}

impl Removal {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// Wire shape of [`Removal`].
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(untagged)]
enum RawRemoval {
    Flag(bool),
    Key(String),
    Keys(Vec<String>),
}

impl From<RawRemoval> for Removal {
    fn from(value: RawRemoval) -> Self {
        match value {
            RawRemoval::Flag(true) => Removal::AllDeclared,
            RawRemoval::Flag(false) => Removal::Nothing,
            RawRemoval::Key(key) => Removal::Keys(vec![key]),
            RawRemoval::Keys(keys) => Removal::Keys(keys),
        }
    }
}

impl From<Removal> for RawRemoval {
    fn from(value: Removal) -> Self {
        match value {
            Removal::Nothing => RawRemoval::Flag(false),
            Removal::AllDeclared => RawRemoval::Flag(true),
            Removal::Keys(keys) => RawRemoval::Keys(keys),
        }
    }
}

// --- REMOTE SEARCH MODELS ---

/// The game a remote handbook search runs against.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    #[serde(rename = "gi")]
    GenshinImpact,
    #[serde(rename = "sr")]
    StarRail,
}

impl Game {
    pub fn code(&self) -> &'static str {
        match self {
            Self::GenshinImpact => "gi",
            Self::StarRail => "sr",
        }
    }
}

/// Remote-search descriptor carried by `search` arguments.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchApi {
    pub game: Game,
    /// Request body template. Values equal to the argument key are replaced by the query.
    #[serde(rename = "jsonBody", default)]
    pub json_body: BTreeMap<String, BodyValue>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BodyValue {
    Text(String),
    List(Vec<String>),
    /// Tolerated for numeric fields such as `limit`.
    Number(i64),
}

/// A single hit returned by the remote handbook search.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "de_description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

/// Handbook ids come as numbers for one game and strings for the other.
fn de_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Handbook text is either plain or a per-language map; English is used for the latter.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedText {
    Plain(String),
    Localized { en: String },
}

impl From<LocalizedText> for String {
    fn from(value: LocalizedText) -> Self {
        match value {
            LocalizedText::Plain(text) | LocalizedText::Localized { en: text } => text,
        }
    }
}

fn de_name<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(LocalizedText::deserialize(deserializer)?.into())
}

fn de_description<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<LocalizedText>::deserialize(deserializer)?.map(String::from))
}

/// Images are a path, or an object carrying the path in `icon`.
fn de_image<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawImage {
        Path(String),
        Icon { icon: String },
    }
    Ok(
        Option::<RawImage>::deserialize(deserializer)?.map(|raw| match raw {
            RawImage::Path(path) | RawImage::Icon { icon: path } => path,
        }),
    )
}

// --- CATALOG TABS ---

/// The three command catalogs, one JSON document each.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandTab {
    #[default]
    Gc,
    Gio,
    Lc,
}

impl CommandTab {
    pub const ALL: [Self; 3] = [Self::Gc, Self::Gio, Self::Lc];

    /// File stem of the catalog document for this tab.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Gc => "gc",
            Self::Gio => "gio",
            Self::Lc => "lc",
        }
    }
}

impl fmt::Display for CommandTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem().to_uppercase())
    }
}

impl FromStr for CommandTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gc" | "0" => Ok(Self::Gc),
            "gio" | "1" => Ok(Self::Gio),
            "lc" | "2" => Ok(Self::Lc),
            other => {
                let expected: Vec<&str> = Self::ALL.iter().map(Self::file_stem).collect();
                Err(format!(
                    "unknown tab '{}' (expected {})",
                    other,
                    expected.join(", ")
                ))
            }
        }
    }
}

// --- TRANSPORT MODELS ---

/// Everything the command transport needs to deliver one command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub uid: String,
    pub code: String,
    pub server: String,
    pub command: String,
}

/// The `{message, code}` reply reported by the game server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub message: String,
    #[serde(default)]
    pub code: i32,
}

// --- SETTINGS MODELS (What is read from `settings.toml`) ---

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSettings {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub server: String,
}

impl PlayerSettings {
    pub fn is_complete(&self) -> bool {
        !self.uid.trim().is_empty() && !self.code.trim().is_empty() && !self.server.trim().is_empty()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    /// Program template used to deliver commands, e.g. `gm-relay --uid <uid> -- <command>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<String>,
}

/// The deserialized structure of `settings.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding `gc.json`, `gio.json` and `lc.json`. `~` and `$VAR` are expanded.
    pub commands_dir: String,
    #[serde(default)]
    pub default_tab: CommandTab,
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub transport: TransportSettings,
}
