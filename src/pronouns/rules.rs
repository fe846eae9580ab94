//! # Rewrite Rules
//!
//! The heuristics behind the pronoun passes, kept as data:
//!
//! - `referents`: keywords that mark a verse as speaking of God
//!   (whole-word, case-insensitive).
//! - `pronouns`: lowercase/capitalized pairs to flip.
//! - `overrides`: literal phrase fixes for human referents the keyword test
//!   gets wrong, applied in list order after the repair pass.
//!
//! The override list is a patch list grown from observed false positives.
//! It is not exhaustive. Entries are applied in order and some are substrings
//! of earlier ones, so reordering changes results.
//!
//! A TOML rules file may replace any of the three lists; lists it omits keep
//! their built-in values.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REFERENTS: &[&str] = &[
    "God",
    "Yahweh",
    "Jesus",
    "Christ",
    "Holy Spirit",
    "Spirit of God",
    "the Lord",
    "the Son",
];

pub const DEFAULT_PRONOUNS: &[(&str, &str)] = &[
    ("he", "He"),
    ("him", "Him"),
    ("his", "His"),
    ("himself", "Himself"),
];

pub const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    (" put Him into the garden ", " put him into the garden "),
    (" and put Him into ", " and put him into "),
    (" and put Him ", " and put him "),
    (" the man and His wife ", " the man and his wife "),
    (" Adam and His wife ", " Adam and his wife "),
    (" Noah and His wife ", " Noah and his wife "),
    (" Abram and His wife ", " Abram and his wife "),
    (" Abraham and His wife ", " Abraham and his wife "),
    (" Lot and His ", " Lot and his "),
    (" Pharaoh and His ", " Pharaoh and his "),
    (" Cain and His ", " Cain and his "),
    (" Abel and His ", " Abel and his "),
    (" the man and His ", " the man and his "),
    (" knew His wife ", " knew his wife "),
    (" and His wife ", " and his wife "),
    (" His wife ", " his wife "),
    (" His flock ", " his flock "),
    (" of His flock ", " of his flock "),
    (" His offering ", " his offering "),
    (" and His offering ", " and his offering "),
    (" the expression on His face ", " the expression on his face "),
    (" His face fell ", " his face fell "),
    (" His sons-in-law ", " his sons-in-law "),
    (" His two daughters ", " his two daughters "),
    (" His daughter", " his daughter"),
    (" His son ", " his son "),
    (" His brother ", " his brother "),
    (" His sons ", " his sons "),
    (" His army ", " his army "),
    (" sent Him out ", " sent him out "),
    (" from which He was taken ", " from which he was taken "),
    (" breathed into His nostrils ", " breathed into his nostrils "),
    (" comparable to Him ", " comparable to him "),
    (" a helper comparable to Him", " a helper comparable to him"),
    (" found a helper comparable to Him", " found a helper comparable to him"),
    (" named Him ", " named him "),
    (" called Him ", " called him "),
    (" bore Him ", " bore him "),
    (" bore to Him ", " bore to him "),
    (" gave birth to Him ", " gave birth to him "),
    (" the male and His female ", " the male and his female "),
    (" shut Him in ", " shut him in "),
    (" with Him in the ship ", " with him in the ship "),
    (" His kingdom ", " his kingdom "),
    (" the beginning of His kingdom ", " the beginning of his kingdom "),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PronounPair {
    pub lower: String,
    pub capitalized: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhraseOverride {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSet {
    pub referents: Vec<String>,
    pub pronouns: Vec<PronounPair>,
    pub overrides: Vec<PhraseOverride>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            referents: DEFAULT_REFERENTS.iter().map(|s| s.to_string()).collect(),
            pronouns: DEFAULT_PRONOUNS
                .iter()
                .map(|(lower, capitalized)| PronounPair {
                    lower: lower.to_string(),
                    capitalized: capitalized.to_string(),
                })
                .collect(),
            overrides: DEFAULT_OVERRIDES
                .iter()
                .map(|(from, to)| PhraseOverride {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub enum RulesError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Pattern(regex::Error),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::Io(e) => write!(f, "rules I/O error: {e}"),
            RulesError::Parse(e) => write!(f, "rules parse error: {e}"),
            RulesError::Pattern(e) => write!(f, "rules pattern error: {e}"),
        }
    }
}

impl std::error::Error for RulesError {}

impl RuleSet {
    pub fn from_toml(contents: &str) -> Result<Self, RulesError> {
        toml::from_str(contents).map_err(RulesError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let contents = fs::read_to_string(path).map_err(RulesError::Io)?;
        Self::from_toml(&contents)
    }
}
