//! # Segment, Classify, Rewrite
//!
//! Every pass has the same shape: cut the chapter at verse markers, decide
//! per verse whether it speaks of God, and rewrite that verse or leave it.
//! Markers pass through untouched.
//!
//! ```text
//! "[6] God said... he  [7] The man... his"
//!   │                    │
//!   ├─ marker ───────────┼──────────────────────────▶ copied
//!   ├─ "God said... he " ─▶ divine  ─▶ capitalize ──▶ "God said... He "
//!   └─ "The man... his"  ─▶ human   ─▶ untouched ───▶ "The man... his"
//! ```

use regex::{NoExpand, Regex};

use super::Pass;
use super::rules::{PhraseOverride, RuleSet, RulesError};
use crate::core::verse::{self, Segment};

/// Apply `rewrite` to every verse-text segment, copying markers verbatim.
pub fn rewrite_verses<F>(content: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    verse::segments(content)
        .into_iter()
        .map(|segment| match segment {
            Segment::Marker(marker) => marker.to_string(),
            Segment::Text("") => String::new(),
            Segment::Text(text) => rewrite(text),
        })
        .collect()
}

/// Whole-word literal substitution, e.g. `\bhe\b` → `He`. Word boundaries
/// are ASCII-only, so a letter like `é` does not join a word.
struct WordSwap {
    pattern: Regex,
    replacement: String,
}

impl WordSwap {
    fn new(from: &str, to: &str) -> Result<Self, RulesError> {
        let pattern = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(from)))
            .map_err(RulesError::Pattern)?;
        Ok(Self {
            pattern,
            replacement: to.to_string(),
        })
    }
}

fn swap_all(text: &str, swaps: &[WordSwap]) -> String {
    let mut out = text.to_string();
    for swap in swaps {
        out = swap
            .pattern
            .replace_all(&out, NoExpand(&swap.replacement))
            .into_owned();
    }
    out
}

/// Compiled form of a [`RuleSet`].
pub struct Rewriter {
    referent: Option<Regex>,
    capitalize: Vec<WordSwap>,
    lowercase: Vec<WordSwap>,
    overrides: Vec<PhraseOverride>,
}

impl Rewriter {
    pub fn new(rules: &RuleSet) -> Result<Self, RulesError> {
        let referent = if rules.referents.is_empty() {
            None
        } else {
            let alternation = rules
                .referents
                .iter()
                .map(|r| regex::escape(r))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)(?-u:\b)(?:{alternation})(?-u:\b)");
            Some(Regex::new(&pattern).map_err(RulesError::Pattern)?)
        };

        let capitalize = rules
            .pronouns
            .iter()
            .map(|p| WordSwap::new(&p.lower, &p.capitalized))
            .collect::<Result<Vec<_>, _>>()?;
        let lowercase = rules
            .pronouns
            .iter()
            .map(|p| WordSwap::new(&p.capitalized, &p.lower))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            referent,
            capitalize,
            lowercase,
            overrides: rules.overrides.clone(),
        })
    }

    /// Does this verse mention a divine referent?
    pub fn is_divine(&self, verse: &str) -> bool {
        self.referent.as_ref().is_some_and(|re| re.is_match(verse))
    }

    /// Capitalize pronouns, but only inside verses that mention a divine
    /// referent. The following verse is never affected.
    pub fn capitalize(&self, content: &str) -> String {
        rewrite_verses(content, |text| {
            if self.is_divine(text) {
                swap_all(text, &self.capitalize)
            } else {
                text.to_string()
            }
        })
    }

    /// Lowercase every capitalized pronoun, regardless of context.
    pub fn revert(&self, content: &str) -> String {
        swap_all(content, &self.lowercase)
    }

    /// Lowercase pronouns in verses without a divine referent, then apply
    /// the phrase overrides in order.
    pub fn repair(&self, content: &str) -> String {
        let mut out = rewrite_verses(content, |text| {
            if self.is_divine(text) {
                text.to_string()
            } else {
                swap_all(text, &self.lowercase)
            }
        });
        for fix in &self.overrides {
            if out.contains(&fix.from) {
                out = out.replace(&fix.from, &fix.to);
            }
        }
        out
    }

    pub fn apply(&self, pass: Pass, content: &str) -> String {
        match pass {
            Pass::Capitalize => self.capitalize(content),
            Pass::Revert => self.revert(content),
            Pass::Repair => self.repair(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> Rewriter {
        Rewriter::new(&RuleSet::default()).unwrap()
    }

    const GENESIS_SAMPLE: &str = "     [6] Then God said, he saw his work.  [7] The man took his wife and went out.  [8] The Lord said to him, \"I am with you.\"";

    #[test]
    fn test_capitalize_divine_verse() {
        let out = rewriter().capitalize("[7] Then God said, he saw that it was good.");
        assert_eq!(out, "[7] Then God said, He saw that it was good.");
    }

    #[test]
    fn test_capitalize_leaves_human_verse() {
        let input = "[3] The man took his wife and went out.";
        assert_eq!(rewriter().capitalize(input), input);
    }

    #[test]
    fn test_capitalize_does_not_bleed_into_next_verse() {
        let out = rewriter().capitalize(GENESIS_SAMPLE);
        assert_eq!(
            out,
            "     [6] Then God said, He saw His work.  [7] The man took his wife and went out.  [8] The Lord said to Him, \"I am with you.\""
        );
    }

    #[test]
    fn test_capitalize_all_four_forms_whole_word_only() {
        let out = rewriter().capitalize("[1] Jesus said he would give himself for him and his; the hem held.");
        assert_eq!(
            out,
            "[1] Jesus said He would give Himself for Him and His; the hem held."
        );
    }

    #[test]
    fn test_word_boundaries_are_ascii_only() {
        let out = rewriter().capitalize("[1] God spoke; éhe and he.");
        assert_eq!(out, "[1] God spoke; éHe and He.");
    }

    #[test]
    fn test_referents_are_case_insensitive() {
        let r = rewriter();
        assert!(r.is_divine("and THE LORD spoke"));
        assert!(r.is_divine("the holy spirit came"));
        assert!(!r.is_divine("the lordship of the land"));
        assert!(!r.is_divine("godly men"));
    }

    #[test]
    fn test_capitalize_is_idempotent() {
        let r = rewriter();
        let samples = [
            GENESIS_SAMPLE,
            "[1] Christ gave himself. [2] he went home.",
            "no markers, but God and he",
            "",
        ];
        for sample in samples {
            let once = r.capitalize(sample);
            assert_eq!(r.capitalize(&once), once, "capitalize twice: {sample:?}");
        }
    }

    #[test]
    fn test_revert_is_idempotent() {
        let r = rewriter();
        let once = r.revert("[1] He said His name to Him. Himself!");
        assert_eq!(once, "[1] he said his name to him. himself!");
        assert_eq!(r.revert(&once), once);
    }

    #[test]
    fn test_revert_undoes_capitalize() {
        let r = rewriter();
        let input = "[1] God saw his light; he called it day. [2] Hebrews and Hezekiah.";
        let restored = r.revert(&r.capitalize(input));
        assert_eq!(restored, input);
    }

    #[test]
    fn test_revert_ignores_context() {
        // Even a divine verse loses its capitals
        let out = rewriter().revert("[1] God said He would.");
        assert_eq!(out, "[1] God said he would.");
    }

    #[test]
    fn test_repair_lowercases_non_divine_verses() {
        let out = rewriter().repair("[1] God spoke to Him. [2] Then He went to His tent.");
        assert_eq!(out, "[1] God spoke to Him. [2] Then he went to his tent.");
    }

    #[test]
    fn test_repair_applies_phrase_overrides() {
        // Both a divine referent and a human "His" in one verse
        let out = rewriter().repair("[25] God blessed Adam and His wife there.");
        assert_eq!(out, "[25] God blessed Adam and his wife there.");
    }

    #[test]
    fn test_repair_override_order_matters() {
        let rules = RuleSet {
            overrides: vec![
                PhraseOverride {
                    from: " His wife ".to_string(),
                    to: " his wife ".to_string(),
                },
                PhraseOverride {
                    from: " his wife ".to_string(),
                    to: " HIS WIFE ".to_string(),
                },
            ],
            ..RuleSet::default()
        };
        let out = Rewriter::new(&rules)
            .unwrap()
            .repair("[1] God saw His wife there.");
        // Second entry matches the output of the first
        assert_eq!(out, "[1] God saw HIS WIFE there.");
    }

    #[test]
    fn test_markers_never_change() {
        let r = rewriter();
        let input = "  [1] God and he  [2] he  [10] his ";
        for pass in [Pass::Capitalize, Pass::Revert, Pass::Repair] {
            let out = r.apply(pass, input);
            let markers: Vec<_> = verse::segments(&out)
                .into_iter()
                .filter(|s| matches!(s, Segment::Marker(_)))
                .collect();
            assert_eq!(
                markers,
                vec![
                    Segment::Marker("  [1] "),
                    Segment::Marker("  [2] "),
                    Segment::Marker("  [10] ")
                ]
            );
        }
    }

    #[test]
    fn test_empty_referents_never_match() {
        let rules = RuleSet {
            referents: vec![],
            ..RuleSet::default()
        };
        let r = Rewriter::new(&rules).unwrap();
        let input = "[1] God said he would.";
        assert_eq!(r.capitalize(input), input);
    }

    #[test]
    fn test_rewrite_verses_sees_only_text() {
        let mut seen = Vec::new();
        let out = rewrite_verses(" [1] a [2] b", |text| {
            seen.push(text.to_string());
            text.to_uppercase()
        });
        assert_eq!(out, " [1] A [2] B");
        assert_eq!(seen, vec!["a", "b"]);
    }
}
