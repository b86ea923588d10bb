use crate::error::{Result, ScaleError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const MAX_DICTIONARY_EXPONENT: i64 = 100;

/// Scale cue tables, keyed by lowercase name, valued as base-10 exponents
///
/// Built once and shared by reference; the tokenizer reads `suffixes` and
/// the resolver compiles the remaining tables into cue patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleDictionary {
    /// Full words; plural `s` is accepted for every entry
    pub words: BTreeMap<String, i64>,

    /// Word-start prefixes such as `kilo`
    pub metric_prefixes: BTreeMap<String, i64>,

    /// Standalone abbreviations seen near a literal, such as `(USD bn)`
    pub abbreviations: BTreeMap<String, i64>,

    /// Letter tokens written directly after a literal, such as `150K`
    pub suffixes: BTreeMap<String, i64>,
}

impl Default for ScaleDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScaleDictionary {
    /// Built-in English financial/scientific tables
    pub fn builtin() -> Self {
        Self {
            words: table(&[
                ("hundred", 2),
                ("thousand", 3),
                ("million", 6),
                ("billion", 9),
                ("trillion", 12),
            ]),
            metric_prefixes: table(&[("kilo", 3), ("mega", 6), ("giga", 9)]),
            abbreviations: table(&[
                ("mil", 6),
                ("mln", 6),
                ("mn", 6),
                ("bn", 9),
                ("tn", 12),
            ]),
            suffixes: table(&[
                ("k", 3),
                ("m", 6),
                ("mn", 6),
                ("mil", 6),
                ("b", 9),
                ("bn", 9),
                ("t", 12),
                ("tn", 12),
            ]),
        }
    }

    /// Dictionary with no entries; useful as a base for TOML overrides
    pub fn empty() -> Self {
        Self {
            words: BTreeMap::new(),
            metric_prefixes: BTreeMap::new(),
            abbreviations: BTreeMap::new(),
            suffixes: BTreeMap::new(),
        }
    }

    /// Parse a dictionary from TOML. Tables that are absent fall back to the
    /// built-in ones; keys are lowercased.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let parsed: Self = toml::from_str(raw)?;
        let dictionary = parsed.normalized();
        dictionary.validate()?;
        Ok(dictionary)
    }

    /// Load a dictionary from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded scale dictionary from {}", path.as_ref().display());
        Self::from_toml_str(&raw)
    }

    /// Look up an attached suffix, case-insensitively
    #[must_use]
    pub fn suffix_exponent(&self, token: &str) -> Option<i64> {
        self.suffixes.get(&token.to_ascii_lowercase()).copied()
    }

    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("words", &self.words),
            ("metric_prefixes", &self.metric_prefixes),
            ("abbreviations", &self.abbreviations),
            ("suffixes", &self.suffixes),
        ];

        if tables.iter().all(|(_, t)| t.is_empty()) {
            return Err(ScaleError::invalid_dictionary("all tables are empty"));
        }

        for (name, entries) in tables {
            for (key, exponent) in entries {
                if key.is_empty() || !key.bytes().all(|b| b.is_ascii_lowercase()) {
                    return Err(ScaleError::invalid_dictionary(format!(
                        "{name}: key {key:?} must be non-empty ASCII letters"
                    )));
                }
                if exponent.abs() > MAX_DICTIONARY_EXPONENT {
                    return Err(ScaleError::invalid_dictionary(format!(
                        "{name}: exponent {exponent} for {key:?} exceeds {MAX_DICTIONARY_EXPONENT}"
                    )));
                }
            }
        }

        Ok(())
    }

    fn normalized(self) -> Self {
        let lower = |t: BTreeMap<String, i64>| {
            t.into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect()
        };
        Self {
            words: lower(self.words),
            metric_prefixes: lower(self.metric_prefixes),
            abbreviations: lower(self.abbreviations),
            suffixes: lower(self.suffixes),
        }
    }
}

fn table(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(name, exponent)| ((*name).to_string(), *exponent))
        .collect()
}
