use crate::models::VocabEntry;
use crate::utils::load_vocabulary;
use anyhow::{anyhow, Result};
use std::io::{stdout, Write};
use std::path::Path;

/// Lowercases a clicked word and drops everything but ASCII letters.
/// Returns `None` when nothing is left.
pub fn normalize_selection(word: &str) -> Option<String> {
    let clean: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    Some(clean).filter(|c| !c.is_empty())
}

pub fn find_entry<'a>(entries: &'a [VocabEntry], selection: &str) -> Option<&'a VocabEntry> {
    let clean = normalize_selection(selection)?;
    entries
        .iter()
        .find(|e| normalize_selection(&e.word).as_deref() == Some(clean.as_str()))
}

/// Prints the vocabulary entry for a selected word.
pub fn lookup(path: &Path, selection: &str) -> Result<()> {
    let entries = load_vocabulary(path)?;
    let entry = find_entry(&entries, selection)
        .ok_or_else(|| anyhow!("No entry for {:?} in {:?}", selection, path))?;
    let mut stdout_lock = stdout().lock();
    writeln!(stdout_lock, "W: {}", entry.word)?;
    writeln!(stdout_lock, "M: {}", entry.meaning)?;
    if let Some(ipa) = &entry.ipa {
        writeln!(stdout_lock, "IPA: {}", ipa)?;
    }
    if let Some(example) = &entry.example {
        writeln!(stdout_lock, "E: {}", example)?;
    }
    let collocations = entry.collocation_list();
    if !collocations.is_empty() {
        writeln!(stdout_lock, "Collocations: {}", collocations.join(", "))?;
    }
    Ok(())
}

#[test]
fn test_normalize_selection() {
    assert_eq!(normalize_selection("Decision,"), Some(String::from("decision")));
    assert_eq!(normalize_selection("\"coffee.\""), Some(String::from("coffee")));
    assert_eq!(normalize_selection("don't"), Some(String::from("dont")));
    assert_eq!(normalize_selection("café"), Some(String::from("caf")));
    assert_eq!(normalize_selection("42!"), None);
    assert_eq!(normalize_selection(""), None);
}

#[test]
fn test_find_entry() {
    let entries = vec![
        VocabEntry {
            word: String::from("huge"),
            meaning: String::from("very big"),
            ipa: None,
            example: None,
            collocations: None,
        },
        VocabEntry {
            word: String::from("interview"),
            meaning: String::from("a formal meeting with questions"),
            ipa: None,
            example: None,
            collocations: None,
        },
    ];
    assert_eq!(find_entry(&entries, "Interview!").unwrap().word, "interview");
    assert_eq!(find_entry(&entries, "(huge)").unwrap().word, "huge");
    assert!(find_entry(&entries, "tiny").is_none());
    assert!(find_entry(&entries, "...").is_none());
}
