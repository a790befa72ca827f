//! crates/commitly_core/src/levels.rs
//!
//! The static level table and the XP -> level resolution rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The named tiers a user can reach, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelName {
    #[serde(rename = "Baby Coder")]
    BabyCoder,
    #[serde(rename = "Script Kiddie")]
    ScriptKiddie,
    #[serde(rename = "Bug Hunter")]
    BugHunter,
    #[serde(rename = "Developer")]
    Developer,
    #[serde(rename = "Guru")]
    Guru,
    #[serde(rename = "Pioneer")]
    Pioneer,
}

impl LevelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelName::BabyCoder => "Baby Coder",
            LevelName::ScriptKiddie => "Script Kiddie",
            LevelName::BugHunter => "Bug Hunter",
            LevelName::Developer => "Developer",
            LevelName::Guru => "Guru",
            LevelName::Pioneer => "Pioneer",
        }
    }

    /// Looks up the table entry for this level.
    pub fn level(&self) -> &'static Level {
        let index = LEVELS
            .iter()
            .position(|level| level.name == *self)
            .unwrap_or(0);
        &LEVELS[index]
    }
}

impl fmt::Display for LevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub name: LevelName,
    pub xp_threshold: u64,
    pub badge_color: &'static str,
}

/// All levels, sorted by ascending threshold. The first entry starts at zero.
pub static LEVELS: [Level; 6] = [
    Level { name: LevelName::BabyCoder, xp_threshold: 0, badge_color: "gray" },
    Level { name: LevelName::ScriptKiddie, xp_threshold: 100, badge_color: "green" },
    Level { name: LevelName::BugHunter, xp_threshold: 300, badge_color: "blue" },
    Level { name: LevelName::Developer, xp_threshold: 700, badge_color: "indigo" },
    Level { name: LevelName::Guru, xp_threshold: 1500, badge_color: "purple" },
    Level { name: LevelName::Pioneer, xp_threshold: 3000, badge_color: "pink" },
];

/// Returns the highest level whose threshold is at or below `xp`.
pub fn resolve_level(xp: u64) -> LevelName {
    LEVELS
        .iter()
        .rev()
        .find(|level| xp >= level.xp_threshold)
        .map(|level| level.name)
        .unwrap_or(LEVELS[0].name)
}

/// Where a user stands between their current level and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub current: &'static Level,
    /// `None` once the top level is reached.
    pub next: Option<&'static Level>,
    /// XP earned since crossing the current threshold.
    pub xp_into_level: u64,
    /// Width of the current level band; zero at the top level.
    pub xp_for_next_level: u64,
}

impl LevelProgress {
    /// Fraction of the current band that is complete, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.xp_for_next_level == 0 {
            return 1.0;
        }
        (self.xp_into_level as f64 / self.xp_for_next_level as f64).min(1.0)
    }
}

pub fn level_progress(xp: u64) -> LevelProgress {
    let current = resolve_level(xp).level();
    let next = LEVELS.iter().find(|level| level.xp_threshold > xp);
    let xp_for_next_level = next
        .map(|next| next.xp_threshold - current.xp_threshold)
        .unwrap_or(0);

    LevelProgress {
        current,
        next,
        xp_into_level: xp - current.xp_threshold,
        xp_for_next_level,
    }
}
