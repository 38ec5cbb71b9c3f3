// src/models/stats.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Server-assigned proficiency bucket for a word, `0..=MasteryLevel::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    /// Highest level the server reports.
    pub const MAX: u8 = 8;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every level from 0 to `MAX`, ascending.
    pub fn all() -> impl Iterator<Item = MasteryLevel> {
        (0..=Self::MAX).map(MasteryLevel)
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mastery distribution for one user. Always replaced wholesale, never patched.
///
/// Wire shape is sparse: `{"unseen": 3, "level_2": 4}`; absent keys mean zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct StatsSnapshot {
    pub unseen: u32,
    levels: BTreeMap<MasteryLevel, u32>,
}

impl StatsSnapshot {
    pub fn new(unseen: u32, levels: impl IntoIterator<Item = (MasteryLevel, u32)>) -> Self {
        Self {
            unseen,
            levels: levels.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }

    pub fn count(&self, level: MasteryLevel) -> u32 {
        self.levels.get(&level).copied().unwrap_or(0)
    }

    /// Sum of all levels at or above `floor` (the "N+" bucket).
    pub fn count_at_or_above(&self, floor: MasteryLevel) -> u32 {
        self.levels
            .range(floor..)
            .fold(0u32, |acc, (_, count)| acc.saturating_add(*count))
    }

    /// Words seen at least once, across all levels. Saturates at `u32::MAX`.
    pub fn seen(&self) -> u32 {
        self.levels
            .values()
            .fold(0u32, |acc, count| acc.saturating_add(*count))
    }
}

fn count_of(key: &str, value: &Value) -> Result<u32, String> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| format!("`{}` is not a non-negative count: {}", key, n)),
        other => Err(format!("`{}` is not a number: {}", key, other)),
    }
}

impl TryFrom<Map<String, Value>> for StatsSnapshot {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut snapshot = StatsSnapshot::default();

        for (key, value) in &raw {
            if key == "unseen" {
                snapshot.unseen = count_of(key, value)?;
                continue;
            }
            let Some(suffix) = key.strip_prefix("level_") else {
                continue;
            };
            let level = suffix.parse::<u8>().ok().and_then(MasteryLevel::new);
            match level {
                Some(level) => {
                    let count = count_of(key, value)?;
                    if count > 0 {
                        snapshot.levels.insert(level, count);
                    }
                }
                None => tracing::warn!("Ignoring out-of-range stats key: {}", key),
            }
        }

        Ok(snapshot)
    }
}

/// One line of the stats dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: String,
    pub count: u32,
}

impl StatRow {
    fn new(label: impl Into<String>, count: u32) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// How a snapshot is laid out on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsLayout {
    /// Only non-zero rows: unseen (if any), then each populated level.
    #[default]
    Sparse,
    /// Fixed rows: unseen, levels below `cap`, and a `cap+` aggregate.
    Bucketed { cap: MasteryLevel },
}

impl StatsLayout {
    pub fn rows(&self, snapshot: &StatsSnapshot) -> Vec<StatRow> {
        match *self {
            StatsLayout::Sparse => {
                let mut rows = Vec::new();
                if snapshot.unseen > 0 {
                    rows.push(StatRow::new("Unseen", snapshot.unseen));
                }
                rows.extend(
                    MasteryLevel::all()
                        .map(|level| (level, snapshot.count(level)))
                        .filter(|(_, count)| *count > 0)
                        .map(|(level, count)| StatRow::new(format!("Mastery Level {}", level), count)),
                );
                rows
            }
            StatsLayout::Bucketed { cap } => {
                let mut rows = vec![StatRow::new("Unseen", snapshot.unseen)];
                rows.extend(
                    MasteryLevel::all()
                        .take_while(|level| *level < cap)
                        .map(|level| StatRow::new(format!("Mastery Level {}", level), snapshot.count(level))),
                );
                rows.push(StatRow::new(
                    format!("Mastery Level {}+", cap),
                    snapshot.count_at_or_above(cap),
                ));
                rows
            }
        }
    }
}

impl FromStr for StatsLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sparse" => Ok(StatsLayout::Sparse),
            "bucketed" => Ok(StatsLayout::Bucketed {
                cap: MasteryLevel(4),
            }),
            other => Err(format!("unknown stats layout `{}` (expected sparse or bucketed)", other)),
        }
    }
}
