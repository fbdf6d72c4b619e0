use crate::error::Error;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use struct_field_names_as_array::FieldNamesAsArray;

pub const DEFAULT_EASE: f64 = 2.0;

/// How well the learner recalled a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Again,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Again, Rating::Good, Rating::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = Error;

    /// Accepts the full names and their first letters, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "a" => Ok(Rating::Again),
            "good" | "g" => Ok(Rating::Good),
            "easy" | "e" => Ok(Rating::Easy),
            _ => Err(Error::InvalidRating(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewEvent {
    pub at: DateTime<Utc>,
    pub rating: Rating,
}

/// A word or phrase under spaced repetition.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewCard {
    pub id: String,
    pub word: String,
    pub context: String,
    pub meaning: Option<String>,
    pub collocations: Vec<String>,
    pub ipa: Option<String>,
    pub ease: f64,
    /// Milliseconds until the next review, unset before the first one.
    pub interval_ms: Option<i64>,
    /// Unset means due now.
    pub due_at: Option<DateTime<Utc>>,
    pub history: Vec<ReviewEvent>,
}

impl ReviewCard {
    pub fn new(id: impl Into<String>, word: impl Into<String>, context: impl Into<String>) -> Self {
        ReviewCard {
            id: id.into(),
            word: word.into(),
            context: context.into(),
            meaning: None,
            collocations: Vec::new(),
            ipa: None,
            ease: DEFAULT_EASE,
            interval_ms: None,
            due_at: None,
            history: Vec::new(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.is_none_or(|due_at| due_at <= now)
    }

    pub fn interval(&self) -> Option<TimeDelta> {
        self.interval_ms.map(TimeDelta::milliseconds)
    }
}

/// One row of a vocabulary file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FieldNamesAsArray)]
pub struct VocabEntry {
    pub word: String,
    pub meaning: String,
    pub ipa: Option<String>,
    pub example: Option<String>,
    /// Separated by `;`
    pub collocations: Option<String>,
}

impl VocabEntry {
    pub fn collocation_list(&self) -> Vec<String> {
        self.collocations
            .as_deref()
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect()
    }
}

#[test]
fn test_parse_rating() {
    assert_eq!("again".parse::<Rating>(), Ok(Rating::Again));
    assert_eq!(" Good\n".parse::<Rating>(), Ok(Rating::Good));
    assert_eq!("E".parse::<Rating>(), Ok(Rating::Easy));
    assert_eq!(
        "hard".parse::<Rating>(),
        Err(Error::InvalidRating(String::from("hard")))
    );
    assert_eq!(
        "".parse::<Rating>(),
        Err(Error::InvalidRating(String::new()))
    );
}

#[test]
fn test_is_due() {
    let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    assert!(card.is_due(now));

    card.due_at = Some(now);
    assert!(card.is_due(now));

    card.due_at = Some(now + TimeDelta::milliseconds(1));
    assert!(!card.is_due(now));
}

#[test]
fn test_collocation_list() {
    let entry = VocabEntry {
        word: String::from("decision"),
        meaning: String::from("a choice that you make"),
        ipa: None,
        example: None,
        collocations: Some(String::from("make a decision; tough decision;;")),
    };
    assert_eq!(
        entry.collocation_list(),
        vec!["make a decision", "tough decision"]
    );
}
