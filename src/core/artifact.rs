//! # Artifact builder
//!
//! Builds the `/give` command for a custom artifact: artifact id, level, amount, main stat
//! and up to four sub-stats, each rolled a number of times. The command line looks like
//! `/give <artifact> lv<level> x<amount> <main-stat> <stat>,<rolls>...`.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Stands in for the artifact id until one is chosen.
pub const ARTIFACT_ID_PLACEHOLDER: &str = "<artifact_id>";
pub const MAX_SUB_STATS: usize = 4;
pub const MAX_LEVEL: u32 = 20;
pub const MAX_AMOUNT: u32 = 999;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("Unknown artifact stat '{0}'.")]
    UnknownStat(String),
    #[error("Unknown main stat '{0}'.")]
    UnknownMainStat(String),
    #[error("Stat '{0}' has an invalid roll count (expected a number of at least 1).")]
    InvalidRolls(String),
    #[error("At most 4 sub-stats are allowed, got {0}.")]
    TooManyStats(usize),
    #[error("Artifact level {0} is out of range (0 to 20).")]
    LevelOutOfRange(u32),
    #[error("Amount {0} is out of range (1 to 999).")]
    AmountOutOfRange(u32),
}

/// A sub-stat the builder offers, with the value of one top-tier roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtifactStat {
    pub id: &'static str,
    /// Game property name without its `FIGHT_PROP_` prefix.
    pub prop: &'static str,
    pub base_value: f64,
    pub percent: bool,
}

impl ArtifactStat {
    pub fn display_name(&self) -> String {
        format_stat_name(self.prop)
    }

    /// The value of one roll as shown in the stat list, e.g. `5.83%`.
    pub fn base_label(&self) -> String {
        format!("{}{}", self.base_value, if self.percent { "%" } else { "" })
    }
}

pub const ARTIFACT_STATS: &[ArtifactStat] = &[
    ArtifactStat { id: "501024", prop: "HP", base_value: 299.0, percent: false },
    ArtifactStat { id: "501034", prop: "HP_PERCENT", base_value: 5.83, percent: true },
    ArtifactStat { id: "501054", prop: "ATTACK", base_value: 19.0, percent: false },
    ArtifactStat { id: "501064", prop: "ATTACK_PERCENT", base_value: 5.83, percent: true },
    ArtifactStat { id: "501084", prop: "DEFENSE", base_value: 23.0, percent: false },
    ArtifactStat { id: "501094", prop: "DEFENSE_PERCENT", base_value: 7.29, percent: true },
    ArtifactStat { id: "501204", prop: "CRITICAL", base_value: 3.89, percent: true },
    ArtifactStat { id: "501224", prop: "CRITICAL_HURT", base_value: 7.77, percent: true },
    ArtifactStat { id: "501234", prop: "CHARGE_EFFICIENCY", base_value: 6.48, percent: true },
    ArtifactStat { id: "501244", prop: "ELEMENT_MASTERY", base_value: 23.0, percent: false },
    // Special stats
    ArtifactStat { id: "992001", prop: "SHIELD_COST_MINUS_RATIO", base_value: 1.0, percent: true },
    ArtifactStat { id: "991001", prop: "HEAL_ADD", base_value: 1.0, percent: true },
    ArtifactStat { id: "990001", prop: "HEALED_ADD", base_value: 1.0, percent: true },
    ArtifactStat { id: "989001", prop: "SKILL_CD_MINUS_RATIO", base_value: 1.0, percent: true },
    ArtifactStat { id: "988001", prop: "SPEED_PERCENT", base_value: 30.0, percent: true },
];

/// Main stats by name, with the id the server expects.
pub const MAIN_STAT_OPTIONS: &[(&str, u32)] = &[
    ("HP", 15001),
    ("ATK", 15003),
    ("HP%", 50980),
    ("ATK%", 50990),
    ("DEF%", 50970),
    ("Elemental Mastery", 50880),
    ("Energy Recharge", 10960),
    ("CRIT Rate", 30960),
    ("CRIT DMG", 30950),
    ("Healing Bonus", 30940),
];

/// Sub-stat roll ids carry their stat in digits 2..5.
const STAT_PATTERNS: &[(&str, &str)] = &[
    ("102", "HP"),
    ("103", "HP%"),
    ("105", "ATK"),
    ("106", "ATK%"),
    ("108", "DEF"),
    ("109", "DEF%"),
    ("123", "Energy Recharge"),
    ("124", "Elemental Mastery"),
    ("120", "CRIT Rate"),
    ("122", "CRIT DMG"),
];

lazy_static! {
    /// The value one roll of each sub-stat id adds.
    static ref SUB_STAT_VALUES: HashMap<&'static str, f64> = [
        // HP
        ("101021", 24.0),
        ("101022", 30.0),
        ("201021", 50.0),
        ("201022", 61.0),
        ("201023", 72.0),
        ("301021", 100.0),
        ("301022", 115.0),
        ("301023", 129.0),
        ("301024", 143.0),
        ("401021", 167.0),
        ("401022", 191.0),
        ("401023", 215.0),
        ("401024", 239.0),
        ("501021", 209.0),
        ("501022", 269.0),
        ("501023", 299.0),
        ("501024", 299.0),
        // HP%
        ("101031", 1.17),
        ("101032", 1.46),
        ("201031", 1.63),
        ("201032", 1.98),
        ("201033", 2.33),
        ("301031", 2.45),
        ("301032", 2.8),
        ("301033", 3.15),
        ("301034", 3.5),
        ("401031", 3.26),
        ("401032", 3.73),
        ("401033", 4.2),
        ("401034", 4.66),
        ("501031", 4.08),
        ("501032", 4.66),
        ("501033", 5.25),
        ("501034", 5.83),
        // ATK
        ("101051", 2.0),
        ("101052", 2.0),
        ("201051", 3.0),
        ("201052", 4.0),
        ("201053", 5.0),
        ("301051", 7.0),
        ("301052", 7.0),
        ("301053", 8.0),
        ("301054", 9.0),
        ("401051", 11.0),
        ("401052", 12.0),
        ("401053", 14.0),
        ("401054", 16.0),
        ("501051", 14.0),
        ("501052", 16.0),
        ("501053", 18.0),
        ("501054", 19.0),
        // ATK%
        ("101061", 1.17),
        ("101062", 1.46),
        ("201061", 1.63),
        ("201062", 1.98),
        ("201063", 2.33),
        ("301061", 2.45),
        ("301062", 2.8),
        ("301063", 3.15),
        ("301064", 3.5),
        ("401061", 3.26),
        ("401062", 3.73),
        ("401063", 4.2),
        ("401064", 4.66),
        ("501061", 4.08),
        ("501062", 4.66),
        ("501063", 5.25),
        ("501064", 5.83),
        // DEF
        ("101081", 2.0),
        ("101082", 2.0),
        ("201081", 4.0),
        ("201082", 5.0),
        ("201083", 6.0),
        ("301081", 8.0),
        ("301082", 9.0),
        ("301083", 10.0),
        ("301084", 11.0),
        ("401081", 13.0),
        ("401082", 15.0),
        ("401083", 17.0),
        ("401084", 19.0),
        ("501081", 16.0),
        ("501082", 19.0),
        ("501083", 21.0),
        ("501084", 23.0),
        // DEF%
        ("101091", 1.46),
        ("101092", 1.82),
        ("201091", 2.04),
        ("201092", 2.48),
        ("201093", 2.91),
        ("301091", 3.06),
        ("301092", 3.5),
        ("301093", 3.93),
        ("301094", 4.37),
        ("401091", 4.08),
        ("401092", 4.66),
        ("401093", 5.25),
        ("401094", 5.83),
        ("501091", 5.1),
        ("501092", 5.83),
        ("501093", 6.56),
        ("501094", 7.29),
        // Energy Recharge
        ("101231", 1.3),
        ("101232", 1.62),
        ("201231", 1.81),
        ("201232", 2.2),
        ("201233", 2.59),
        ("301231", 2.72),
        ("301232", 3.11),
        ("301233", 3.5),
        ("301234", 3.89),
        ("401231", 3.63),
        ("401232", 4.14),
        ("401233", 4.66),
        ("401234", 5.18),
        ("501231", 4.53),
        ("501232", 5.18),
        ("501233", 5.83),
        ("501234", 6.48),
        // Elemental Mastery
        ("101241", 5.0),
        ("101242", 6.0),
        ("201241", 7.0),
        ("201242", 8.0),
        ("201243", 9.0),
        ("301241", 10.0),
        ("301242", 11.0),
        ("301243", 13.0),
        ("301244", 14.0),
        ("401241", 13.0),
        ("401242", 15.0),
        ("401243", 17.0),
        ("401244", 19.0),
        ("501241", 16.0),
        ("501242", 19.0),
        ("501243", 21.0),
        ("501244", 23.0),
        // CRIT Rate
        ("101201", 0.78),
        ("101202", 0.97),
        ("201201", 1.09),
        ("201202", 1.32),
        ("201203", 1.55),
        ("301201", 1.63),
        ("301202", 1.86),
        ("301203", 2.1),
        ("301204", 2.33),
        ("401201", 2.18),
        ("401202", 2.49),
        ("401203", 2.8),
        ("401204", 3.11),
        ("501201", 2.72),
        ("501202", 3.11),
        ("501203", 3.5),
        ("501204", 3.89),
        // CRIT DMG
        ("101221", 1.55),
        ("101222", 1.94),
        ("201221", 2.18),
        ("201222", 2.64),
        ("201223", 3.11),
        ("301221", 3.26),
        ("301222", 3.73),
        ("301223", 4.2),
        ("301224", 4.66),
        ("401221", 4.35),
        ("401222", 4.97),
        ("401223", 5.6),
        ("401224", 6.22),
        ("501221", 5.44),
        ("501222", 6.22),
        ("501223", 6.99),
        ("501224", 7.77),
    ]
    .into_iter()
    .collect();
}

/// Human name of a game property, e.g. `CRITICAL_HURT` -> `CRIT DMG`.
pub fn format_stat_name(prop: &str) -> String {
    let name = match prop {
        "HP" => "HP",
        "HP_PERCENT" => "HP%",
        "ATTACK" => "ATK",
        "ATTACK_PERCENT" => "ATK%",
        "DEFENSE" => "DEF",
        "DEFENSE_PERCENT" => "DEF%",
        "CRITICAL" => "CRIT Rate",
        "CRITICAL_HURT" => "CRIT DMG",
        "CHARGE_EFFICIENCY" => "Energy Recharge",
        "ELEMENT_MASTERY" => "Elemental Mastery",
        "HEAL_ADD" => "Healing Bonus",
        "HEALED_ADD" => "Incoming Healing Bonus",
        "SKILL_CD_MINUS_RATIO" => "Cooldown Reduction",
        "SPEED_PERCENT" => "Movement SPD",
        other => return other.replace('_', " "),
    };
    name.to_string()
}

/// Finds an offered stat by id or display name (case-insensitive).
pub fn find_stat(name_or_id: &str) -> Option<&'static ArtifactStat> {
    ARTIFACT_STATS.iter().find(|stat| {
        stat.id == name_or_id || stat.display_name().eq_ignore_ascii_case(name_or_id)
    })
}

/// The value one roll of `stat_id` adds, or 0 for an unknown id.
pub fn sub_stat_value(stat_id: &str) -> f64 {
    SUB_STAT_VALUES.get(stat_id).copied().unwrap_or_default()
}

/// The stat a roll id belongs to, e.g. `501224` -> `CRIT DMG`.
pub fn stat_name_from_id(stat_id: &str) -> Option<&'static str> {
    let pattern = stat_id.get(2..5)?;
    STAT_PATTERNS
        .iter()
        .find(|(p, _)| *p == pattern)
        .map(|(_, name)| *name)
}

/// Every roll id of the stat called `name`, weakest roll first.
pub fn stat_ids_by_name(name: &str) -> Vec<&'static str> {
    let Some((pattern, _)) = STAT_PATTERNS.iter().find(|(_, n)| *n == name) else {
        return Vec::new();
    };
    let mut ids: Vec<(&'static str, f64)> = SUB_STAT_VALUES
        .iter()
        .filter(|(id, _)| id.get(2..5) == Some(*pattern))
        .map(|(id, value)| (*id, *value))
        .collect();
    ids.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(b.0)));
    ids.into_iter().map(|(id, _)| id).collect()
}

/// Whether the stat called `name` is shown as a percentage.
pub fn is_percent_stat(name: &str) -> bool {
    ARTIFACT_STATS
        .iter()
        .find(|stat| stat.display_name() == name)
        .is_some_and(|stat| stat.percent)
}

/// The total a sub-stat adds after `rolls` rolls, formatted for display.
///
/// Cooldown Reduction adds 50% per roll and both healing bonuses add 80% per roll,
/// whatever the id. Percentages keep one decimal; flat values are rounded.
pub fn calculate_stat_value(stat_id: &str, rolls: u32, percent: bool, stat_name: &str) -> String {
    let rolls = f64::from(rolls);
    match stat_name {
        "Cooldown Reduction" => return format!("{:.1}%", rolls * 50.0),
        "Healing Bonus" | "Incoming Healing Bonus" => return format!("{:.1}%", rolls * 80.0),
        _ => {}
    }

    let value = sub_stat_value(stat_id) * rolls;
    if percent
        || stat_name.contains('%')
        || matches!(stat_name, "CRIT Rate" | "CRIT DMG" | "Energy Recharge")
    {
        format!("{:.1}%", value)
    } else {
        format!("{}", value.round())
    }
}

/// One sub-stat of the artifact: the roll id sent to the server and how often it rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedStat {
    pub id: String,
    pub rolls: u32,
}

impl SelectedStat {
    /// The stat's display name, falling back to the raw id.
    pub fn name(&self) -> String {
        stat_name_from_id(&self.id)
            .map(str::to_string)
            .or_else(|| find_stat(&self.id).map(ArtifactStat::display_name))
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn value_label(&self) -> String {
        let name = self.name();
        calculate_stat_value(&self.id, self.rolls, is_percent_stat(&name), &name)
    }
}

impl FromStr for SelectedStat {
    type Err = ArtifactError;

    /// Reads `<id or name>[,<rolls>]`. A stat name picks its first roll id in id order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stat, rolls) = match s.split_once(',') {
            Some((stat, rolls)) => {
                let rolls = rolls
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ArtifactError::InvalidRolls(s.to_string()))?;
                (stat.trim(), rolls)
            }
            None => (s.trim(), 1),
        };
        Ok(Self {
            id: resolve_stat_id(stat)?,
            rolls,
        })
    }
}

fn resolve_stat_id(stat: &str) -> Result<String, ArtifactError> {
    if SUB_STAT_VALUES.contains_key(stat) {
        return Ok(stat.to_string());
    }
    let found = find_stat(stat).ok_or_else(|| ArtifactError::UnknownStat(stat.to_string()))?;
    let mut ids = stat_ids_by_name(&found.display_name());
    ids.sort_unstable();
    Ok(ids.first().copied().unwrap_or(found.id).to_string())
}

/// Resolves a main stat given by name (case-insensitive) or by numeric id.
pub fn main_stat_id(name_or_id: &str) -> Result<u32, ArtifactError> {
    let name_or_id = name_or_id.trim();
    if let Ok(id) = name_or_id.parse::<u32>() {
        return Ok(id);
    }
    MAIN_STAT_OPTIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(name_or_id))
        .map(|(_, id)| *id)
        .ok_or_else(|| ArtifactError::UnknownMainStat(name_or_id.to_string()))
}

/// Builds the `/give` line. Without sub-stats the line ends at the main stat.
pub fn generate_command(
    artifact_id: &str,
    level: u32,
    amount: u32,
    stats: &[SelectedStat],
    main_stat_id: u32,
) -> String {
    let mut command = format!("/give {} lv{} x{} {}", artifact_id, level, amount, main_stat_id);
    for stat in stats {
        command.push_str(&format!(" {},{}", stat.id, stat.rolls));
    }
    command
}

/// Everything the builder needs for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub artifact_id: String,
    pub level: u32,
    pub amount: u32,
    pub main_stat_id: u32,
    pub stats: Vec<SelectedStat>,
}

impl Default for ArtifactSpec {
    fn default() -> Self {
        Self {
            artifact_id: ARTIFACT_ID_PLACEHOLDER.to_string(),
            level: 1,
            amount: 1,
            main_stat_id: 15001,
            stats: Vec::new(),
        }
    }
}

impl ArtifactSpec {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.level > MAX_LEVEL {
            return Err(ArtifactError::LevelOutOfRange(self.level));
        }
        if !(1..=MAX_AMOUNT).contains(&self.amount) {
            return Err(ArtifactError::AmountOutOfRange(self.amount));
        }
        if self.stats.len() > MAX_SUB_STATS {
            return Err(ArtifactError::TooManyStats(self.stats.len()));
        }
        Ok(())
    }

    /// The command line for this artifact, after validation.
    pub fn command(&self) -> Result<String, ArtifactError> {
        self.validate()?;
        let artifact_id = match self.artifact_id.trim() {
            "" => ARTIFACT_ID_PLACEHOLDER,
            id => id,
        };
        Ok(generate_command(
            artifact_id,
            self.level,
            self.amount,
            &self.stats,
            self.main_stat_id,
        ))
    }
}
