use crate::utils::load_vocabulary;
use anyhow::Result;
use std::fmt;
use std::io::{stdout, Write};
use std::path::Path;

/// Activity totals that badges are earned from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub deck_size: usize,
    pub conversations: usize,
    pub journal_entries: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            if self.earned { "x" } else { " " },
            self.name,
            self.description
        )
    }
}

pub fn badges(progress: &Progress) -> Vec<Badge> {
    vec![
        Badge {
            id: "ctx-50",
            name: "Contextual",
            description: "50 words from authentic content",
            earned: progress.deck_size >= 50,
        },
        Badge {
            id: "brave-5",
            name: "Brave",
            description: "5 conversation simulations",
            earned: progress.conversations >= 5,
        },
        Badge {
            id: "journal-7",
            name: "Diligent writer",
            description: "7 days of journaling in a row",
            earned: progress.journal_entries >= 7,
        },
    ]
}

/// Prints the badges for the words in `path` and the given activity counts.
pub fn progress(path: &Path, conversations: usize, journal_entries: usize) -> Result<()> {
    let progress = Progress {
        deck_size: load_vocabulary(path)?.len(),
        conversations,
        journal_entries,
    };
    let mut stdout_lock = stdout().lock();
    writeln!(
        stdout_lock,
        "Words: {}  Conversations: {}  Journal entries: {}\n",
        progress.deck_size, progress.conversations, progress.journal_entries
    )?;
    for badge in badges(&progress) {
        writeln!(stdout_lock, "{}", badge)?;
    }
    Ok(())
}

#[test]
fn test_badge_thresholds() {
    let earned = |p: Progress| -> Vec<bool> { badges(&p).iter().map(|b| b.earned).collect() };

    assert_eq!(earned(Progress::default()), vec![false, false, false]);
    assert_eq!(
        earned(Progress {
            deck_size: 49,
            conversations: 4,
            journal_entries: 6,
        }),
        vec![false, false, false]
    );
    assert_eq!(
        earned(Progress {
            deck_size: 50,
            conversations: 5,
            journal_entries: 7,
        }),
        vec![true, true, true]
    );
    assert_eq!(
        earned(Progress {
            deck_size: 120,
            conversations: 0,
            journal_entries: 9,
        }),
        vec![true, false, true]
    );
}

#[test]
fn test_badge_display() {
    let all = badges(&Progress {
        conversations: 5,
        ..Progress::default()
    });
    assert_eq!(all[0].to_string(), "[ ] Contextual: 50 words from authentic content");
    assert_eq!(all[1].to_string(), "[x] Brave: 5 conversation simulations");
}
