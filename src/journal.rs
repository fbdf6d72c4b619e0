use anyhow::{anyhow, Result};
use regex::Regex;
use std::fmt;
use std::io::{stdout, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

static VERY_BIG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)very big").unwrap());
static YESTERDAY_IS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)yesterday.*is").unwrap());

/// Entries with fewer words than this are asked to grow.
pub const MIN_WORDS: usize = 20;

/// One piece of feedback on a journal entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Note {
    VeryBig,
    YesterdayIs,
    TooShort,
    AllGood,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Note::VeryBig => {
                "Nice sentence! To sound more natural, replace 'very big' with 'huge' or 'enormous'."
            }
            Note::YesterdayIs => "Watch the tense: after 'yesterday', use 'was/were', not 'is'.",
            Note::TooShort => "Try growing your story to 3-4 sentences for richer context.",
            Note::AllGood => "Great job! No major feedback. Keep going!",
        })
    }
}

/// Checks a journal entry. Never empty: without remarks it says so.
pub fn analyze(text: &str) -> Vec<Note> {
    let mut notes = Vec::new();
    if VERY_BIG_RE.is_match(text) {
        notes.push(Note::VeryBig);
    }
    // Within a single line
    if YESTERDAY_IS_RE.is_match(text) {
        notes.push(Note::YesterdayIs);
    }
    // Counted on single spaces, as typed
    if text.split(' ').count() < MIN_WORDS {
        notes.push(Note::TooShort);
    }
    if notes.is_empty() {
        notes.push(Note::AllGood);
    }
    notes
}

/// Prints feedback for the journal entry stored in `path`.
pub fn journal(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File {:?} doesn't exist. Aborting.", path));
    }
    let text = std::fs::read_to_string(path)?;
    let notes = analyze(&text);
    info!(?path, notes = notes.len(), "analyzed journal entry");
    let mut stdout_lock = stdout().lock();
    for note in notes {
        writeln!(stdout_lock, "- {}", note)?;
    }
    Ok(())
}

#[test]
fn test_short_entry() {
    assert_eq!(analyze("I went to school."), vec![Note::TooShort]);
    assert_eq!(analyze(""), vec![Note::TooShort]);
}

#[test]
fn test_very_big_and_tense() {
    let notes = analyze("Yesterday my school is Very Big.");
    assert_eq!(notes, vec![Note::VeryBig, Note::YesterdayIs, Note::TooShort]);
}

#[test]
fn test_yesterday_rule_stays_on_one_line() {
    let text = "Yesterday I walked to the old market near the river with my two brothers and we\n\
        bought fresh fruit there because the weather is warm and sunny today.";
    assert!(!analyze(text).contains(&Note::YesterdayIs));
}

#[test]
fn test_long_clean_entry() {
    let text = "Yesterday I was at the office early because we had a meeting with a new client \
        from Jakarta and I presented our plan for the next quarter.";
    assert_eq!(analyze(text), vec![Note::AllGood]);
}

#[test]
fn test_journal_requires_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = journal(&dir.path().join("missing.txt"));
    assert!(result.unwrap_err().to_string().ends_with("doesn't exist. Aborting."));
}

#[test]
fn test_note_messages() {
    assert!(Note::VeryBig.to_string().contains("'huge' or 'enormous'"));
    assert!(Note::YesterdayIs.to_string().contains("'was/were'"));
}
