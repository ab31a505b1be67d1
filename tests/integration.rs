//! Integration tests against the real upstream sites.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! network access and depend on third-party page layouts.
//!
//! Run with: `cargo test --test integration -- --ignored`

use crossie::{
    AnagramQuery, ClientConfig, Crossie, CrosswordError, PatternQuery, SortOrder, SynonymQuery,
};

fn crossie() -> Crossie {
    Crossie::new(&ClientConfig::default().with_timeout(20)).expect("create client")
}

mod synonyms_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_synonyms_happy_starting_with_j() {
        let query = SynonymQuery::new("happy")
            .with_starts_with("j")
            .with_sort(SortOrder::Alpha);
        let result = crossie().synonyms(query).await.unwrap();
        let words: Vec<_> = result.synonyms().collect();
        println!("happy/j: {:?}", words);
        assert!(!words.is_empty());
        assert!(words.iter().all(|w| w.starts_with('j')));
        assert!(words.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    #[ignore]
    async fn test_synonyms_extended_sort_last() {
        let query = SynonymQuery::new("happy").with_all(true);
        let result = crossie().synonyms(query).await.unwrap();
        if let Some(first) = result.entries.iter().position(|e| e.is_extended()) {
            assert!(result.entries[first..].iter().all(|e| e.is_extended()));
        }
    }
}

mod find_words_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_find_words_with_synonym() {
        let query = PatternQuery::new(".A.E").with_synonyms(vec!["love".to_string()]);
        let result = crossie().find_words(query).await.unwrap();
        println!(
            "{} of {} words, synonym matches {:?}",
            result.words.len(),
            result.total_words,
            result.synonym_matches
        );
        assert!(result.words.iter().all(|w| {
            let chars: Vec<char> = w.chars().collect();
            chars.len() == 4 && chars[1] == 'a' && chars[3] == 'e'
        }));
        assert!(result
            .synonym_matches
            .iter()
            .all(|m| result.words.contains(m)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_find_words_past_last_page() {
        let err = crossie()
            .find_words(PatternQuery::new("CR.SS").with_page(99))
            .await
            .unwrap_err();
        assert!(matches!(err, CrosswordError::Pagination { .. }));
    }
}

mod anagram_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_anagrams_listen() {
        let result = crossie().anagrams(AnagramQuery::new("listen")).await.unwrap();
        println!("anagrams: {:?}", result.phrases);
        assert!(result.phrases.iter().all(|p| p.len() >= 6));
        assert!(result
            .phrases
            .iter()
            .all(|p| !p.eq_ignore_ascii_case("listen")));
    }
}
