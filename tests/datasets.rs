// Invariants of the built-in vocabulary.
// Native only; no browser APIs.

use std::collections::HashSet;

#[test]
fn word_list_entries_are_unique_and_valid() {
    let mut seen = HashSet::new();
    for w in claw_typer::WORD_LIST {
        assert!(seen.insert(*w), "duplicate word '{}' in WORD_LIST", w);
        assert!(!w.is_empty(), "empty word in WORD_LIST");
        for c in w.chars() {
            assert!(c.is_ascii_lowercase(), "invalid char '{}' in word '{}'", c, w);
        }
    }
}

#[test]
fn default_vocabulary_is_the_word_list() {
    let vocab = claw_typer::Vocabulary::default();
    assert_eq!(vocab.len(), claw_typer::WORD_LIST.len());
    assert!(vocab.words().iter().zip(claw_typer::WORD_LIST).all(|(a, b)| a == b));
}

#[test]
fn word_list_passes_vocabulary_validation() {
    let vocab = claw_typer::Vocabulary::new(claw_typer::WORD_LIST.iter().copied())
        .expect("built-in words are valid");
    assert_eq!(vocab, claw_typer::Vocabulary::default());
}

#[test]
fn every_letter_prefix_has_a_word() {
    // the first letter is all the player needs to pick a target
    let firsts: HashSet<char> = claw_typer::WORD_LIST
        .iter()
        .filter_map(|w| w.chars().next())
        .collect();
    assert!(firsts.len() >= 10, "too few distinct first letters: {:?}", firsts);
}
