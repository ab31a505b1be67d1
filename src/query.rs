//! Query representations for the three crossword lookups.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CrosswordError, Result};

/// Order in which synonyms are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Case-insensitive alphabetical order.
    Alpha,
    /// The order in which the source page presents them.
    #[default]
    Display,
}

/// A query for synonyms of a word or phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynonymQuery {
    /// Word or phrase to find synonyms for.
    pub word: String,
    /// Regular expression synonyms must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Prefix synonyms must start with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_with: Option<String>,
    /// Suffix synonyms must end with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_letters: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_letters: Option<usize>,
    #[serde(default)]
    pub sort: SortOrder,
    /// Include synonyms hidden behind the source page's "more" disclosure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub all: bool,
}

impl SynonymQuery {
    /// Creates a query for the given word with no filters.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// Sets the regular expression synonyms must match.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the prefix synonyms must start with.
    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    /// Sets the suffix synonyms must end with.
    pub fn with_ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    /// Sets the minimum synonym length in letters.
    pub fn with_min_letters(mut self, min: usize) -> Self {
        self.min_letters = Some(min);
        self
    }

    /// Sets the maximum synonym length in letters.
    pub fn with_max_letters(mut self, max: usize) -> Self {
        self.max_letters = Some(max);
        self
    }

    /// Sets the result order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Sets whether extended synonyms are included.
    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    /// Builds a query from request parameters (`word`, `startsWith`,
    /// `endsWith`, `pattern`, `minLetters`, `maxLetters`, `sort`, `all`).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let word = non_empty(params, "word")
            .ok_or_else(|| CrosswordError::InvalidInput("no word specified".into()))?;
        let sort = match params.get("sort").map(String::as_str) {
            Some("alpha") => SortOrder::Alpha,
            _ => SortOrder::Display,
        };
        Ok(Self {
            word,
            pattern: non_empty(params, "pattern"),
            starts_with: non_empty(params, "startsWith"),
            ends_with: non_empty(params, "endsWith"),
            min_letters: parse_number(params, "minLetters", "invalid min letters")?,
            max_letters: parse_number(params, "maxLetters", "invalid max letters")?,
            sort,
            all: flag(params, "all"),
        })
    }

    /// Lower-cases text fields, drops zero lengths and orders min/max.
    pub fn normalize(&mut self) {
        self.word = self.word.to_lowercase();
        for field in [&mut self.pattern, &mut self.starts_with, &mut self.ends_with] {
            *field = field
                .take()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.is_empty());
        }
        self.min_letters = self.min_letters.filter(|&n| n > 0);
        self.max_letters = self.max_letters.filter(|&n| n > 0);
        if let (Some(min), Some(max)) = (self.min_letters, self.max_letters) {
            if min > max {
                self.min_letters = Some(max);
                self.max_letters = Some(min);
            }
        }
    }
}

/// The most auxiliary synonym words a pattern query accepts.
pub const MAX_PATTERN_SYNONYMS: usize = 2;

/// A query for words matching a frame such as `CR.SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternQuery {
    /// Letters and `.` wildcards.
    pub frame: String,
    /// 1-based result page.
    pub page: u32,
    /// Words whose synonyms are cross-checked against the matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

impl PatternQuery {
    /// Creates a query for the first page of `frame`.
    pub fn new(frame: impl Into<String>) -> Self {
        Self {
            frame: frame.into(),
            page: 1,
            synonyms: Vec::new(),
        }
    }

    /// Sets the 1-based result page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the auxiliary words whose synonyms are cross-checked.
    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Builds a query from request parameters (`frame`, `page`, `syn1`, `syn2`).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut query = Self {
            frame: params.get("frame").cloned().unwrap_or_default(),
            page: parse_number(params, "page", "page number")?.unwrap_or(1),
            synonyms: ["syn1", "syn2"]
                .iter()
                .filter_map(|key| non_empty(params, key))
                .collect(),
        };
        query.validate()?;
        Ok(query)
    }

    /// Checks the frame and synonym count; a zero page becomes page 1.
    pub fn validate(&mut self) -> Result<()> {
        if self.page == 0 {
            self.page = 1;
        }
        if self.frame.is_empty() {
            return Err(CrosswordError::InvalidInput("empty frame not allowed".into()));
        }
        if !self
            .frame
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '.')
        {
            return Err(CrosswordError::InvalidInput(
                "inputs can only be letters or dots".into(),
            ));
        }
        if self.frame.chars().all(|c| c == '.') {
            return Err(CrosswordError::InvalidInput(
                "inputs cannot all be dots".into(),
            ));
        }
        if self.synonyms.len() > MAX_PATTERN_SYNONYMS {
            return Err(CrosswordError::InvalidInput(format!(
                "at most {MAX_PATTERN_SYNONYMS} synonym words allowed"
            )));
        }
        Ok(())
    }
}

/// A query for anagrams of a phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnagramQuery {
    pub phrase: String,
    /// Also return anagrams shorter than the phrase.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

impl AnagramQuery {
    /// Creates a query for full-length anagrams of `phrase`.
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            partial: false,
        }
    }

    /// Sets whether shorter anagrams are returned too.
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Builds a query from request parameters (`phrase`, `partial`).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut query = Self {
            phrase: params.get("phrase").cloned().unwrap_or_default(),
            partial: flag(params, "partial"),
        };
        query.normalize()?;
        Ok(query)
    }

    /// Strips all whitespace from the phrase, rejecting an empty result.
    pub fn normalize(&mut self) -> Result<()> {
        self.phrase.retain(|c| !c.is_whitespace());
        if self.phrase.is_empty() {
            return Err(CrosswordError::InvalidInput("empty phrase not allowed".into()));
        }
        Ok(())
    }
}

fn non_empty(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

fn flag(params: &HashMap<String, String>, key: &str) -> bool {
    params.get(key).is_some_and(|v| v == "true")
}

fn parse_number<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    what: &str,
) -> Result<Option<T>> {
    match non_empty(params, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CrosswordError::InvalidInput(format!("{what} {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sort_order_default() {
        assert_eq!(SortOrder::default(), SortOrder::Display);
        assert_eq!(serde_json::to_string(&SortOrder::Alpha).unwrap(), "\"alpha\"");
    }

    #[test]
    fn test_synonym_query_builder_chain() {
        let query = SynonymQuery::new("happy")
            .with_starts_with("j")
            .with_ends_with("y")
            .with_pattern("^j.*")
            .with_min_letters(3)
            .with_max_letters(8)
            .with_sort(SortOrder::Alpha)
            .with_all(true);
        assert_eq!(query.word, "happy");
        assert_eq!(query.starts_with.as_deref(), Some("j"));
        assert_eq!(query.ends_with.as_deref(), Some("y"));
        assert_eq!(query.pattern.as_deref(), Some("^j.*"));
        assert_eq!(query.min_letters, Some(3));
        assert_eq!(query.max_letters, Some(8));
        assert_eq!(query.sort, SortOrder::Alpha);
        assert!(query.all);
    }

    #[test]
    fn test_synonym_query_from_params() {
        let query = SynonymQuery::from_params(&params(&[
            ("word", "Happy"),
            ("startsWith", "J"),
            ("minLetters", "4"),
            ("maxLetters", ""),
            ("sort", "alpha"),
            ("all", "true"),
        ]))
        .unwrap();
        assert_eq!(query.word, "Happy");
        assert_eq!(query.starts_with.as_deref(), Some("J"));
        assert_eq!(query.min_letters, Some(4));
        assert_eq!(query.max_letters, None);
        assert_eq!(query.sort, SortOrder::Alpha);
        assert!(query.all);
    }

    #[test]
    fn test_synonym_query_from_params_defaults() {
        let query = SynonymQuery::from_params(&params(&[("word", "x"), ("sort", "bogus"), ("all", "yes")]))
            .unwrap();
        assert_eq!(query.sort, SortOrder::Display);
        assert!(!query.all);
    }

    #[test]
    fn test_synonym_query_from_params_missing_word() {
        let err = SynonymQuery::from_params(&params(&[])).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_synonym_query_from_params_bad_number() {
        let err = SynonymQuery::from_params(&params(&[("word", "x"), ("minLetters", "five")]))
            .unwrap_err();
        assert!(matches!(err, CrosswordError::InvalidInput(_)));
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn test_synonym_query_normalize() {
        let mut query = SynonymQuery::new("HaPPy")
            .with_starts_with("J")
            .with_ends_with("")
            .with_pattern("^J")
            .with_min_letters(9)
            .with_max_letters(3);
        query.normalize();
        assert_eq!(query.word, "happy");
        assert_eq!(query.starts_with.as_deref(), Some("j"));
        assert_eq!(query.ends_with, None);
        assert_eq!(query.pattern.as_deref(), Some("^j"));
        assert_eq!(query.min_letters, Some(3));
        assert_eq!(query.max_letters, Some(9));
    }

    #[test]
    fn test_synonym_query_normalize_zero_is_unset() {
        let mut query = SynonymQuery::new("x").with_min_letters(0).with_max_letters(0);
        query.normalize();
        assert_eq!(query.min_letters, None);
        assert_eq!(query.max_letters, None);
    }

    #[test]
    fn test_synonym_query_serialization() {
        let query = SynonymQuery::new("happy").with_starts_with("j");
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("\"word\":\"happy\""));
        assert!(json.contains("\"startsWith\":\"j\""));
        assert!(!json.contains("endsWith"));
        assert!(!json.contains("\"all\""));
    }

    #[test]
    fn test_pattern_query_valid_frames() {
        assert!(PatternQuery::new("CR.SS").validate().is_ok());
        assert!(PatternQuery::new(".a.e").validate().is_ok());
    }

    #[test]
    fn test_pattern_query_rejects_all_wildcards() {
        let err = PatternQuery::new("....").validate().unwrap_err();
        assert!(matches!(err, CrosswordError::InvalidInput(_)));
    }

    #[test]
    fn test_pattern_query_rejects_non_letters() {
        let err = PatternQuery::new("cr2ss").validate().unwrap_err();
        assert!(matches!(err, CrosswordError::InvalidInput(_)));
        let err = PatternQuery::new("").validate().unwrap_err();
        assert!(matches!(err, CrosswordError::InvalidInput(_)));
        assert!(PatternQuery::new("cr ss").validate().is_err());
        assert!(PatternQuery::new("créss").validate().is_err());
    }

    #[test]
    fn test_pattern_query_too_many_synonyms() {
        let mut query = PatternQuery::new("c.t").with_synonyms(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_pattern_query_zero_page_defaults_to_one() {
        let mut query = PatternQuery::new("c.t").with_page(0);
        query.validate().unwrap();
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_pattern_query_from_params() {
        let query = PatternQuery::from_params(&params(&[
            ("frame", ".A.E"),
            ("page", "2"),
            ("syn1", "love"),
            ("syn2", ""),
        ]))
        .unwrap();
        assert_eq!(query.frame, ".A.E");
        assert_eq!(query.page, 2);
        assert_eq!(query.synonyms, vec!["love"]);
    }

    #[test]
    fn test_pattern_query_from_params_bad_page() {
        let err = PatternQuery::from_params(&params(&[("frame", "c.t"), ("page", "two")]))
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_anagram_query_normalize_strips_whitespace() {
        let mut query = AnagramQuery::new(" dormitory\tro om\n");
        query.normalize().unwrap();
        assert_eq!(query.phrase, "dormitoryroom");
    }

    #[test]
    fn test_anagram_query_empty_phrase() {
        let mut query = AnagramQuery::new("  \t ");
        let err = query.normalize().unwrap_err();
        assert!(matches!(err, CrosswordError::InvalidInput(_)));
    }

    #[test]
    fn test_anagram_query_from_params() {
        let query = AnagramQuery::from_params(&params(&[("phrase", "silent night"), ("partial", "true")]))
            .unwrap();
        assert_eq!(query.phrase, "silentnight");
        assert!(query.partial);
        assert!(AnagramQuery::from_params(&params(&[])).is_err());
    }
}
