//! Sentence builder: place words from a fixed bank into four slots and get
//! feedback on whether the tense fits the time marker.

use crate::utils::read_line;
use anyhow::Result;
use std::fmt;
use std::io::{stdin, stdout, BufRead, Write};
use tracing::{debug, warn};

pub const BANK: [&str; 9] = [
    "I",
    "She",
    "was",
    "is",
    "walk",
    "walked",
    "to school",
    "yesterday",
    "now",
];

pub const SLOTS: [&str; 4] = ["Subject", "Aux", "Verb", "Object/Time"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sentence {
    pub subject: Option<String>,
    pub aux: Option<String>,
    pub verb: Option<String>,
    pub time: Option<String>,
}

impl Sentence {
    /// Filled slots joined by spaces, with a full stop.
    pub fn text(&self) -> String {
        let words: Vec<&str> = [&self.subject, &self.aux, &self.verb, &self.time]
            .into_iter()
            .filter_map(|w| w.as_deref())
            .collect();
        format!("{}.", words.join(" "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    PastNeedsWasWere,
    PastNeedsV2,
    PastCorrect(String),
    PresentNeedsIs,
    PresentNeedsIng,
    PresentCorrect(String),
    AddTimeMarker,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::PastNeedsWasWere => write!(
                f,
                "Remember, for a story in the past use 'was'/'were'. 'Is' is for things happening now."
            ),
            Verdict::PastNeedsV2 => write!(f, "For the simple past, use the V2 form: 'walked'."),
            Verdict::PastCorrect(s) => write!(f, "Well done! The past sentence is right: {}", s),
            Verdict::PresentNeedsIs => write!(
                f,
                "For something happening right now, use 'am/is/are'."
            ),
            Verdict::PresentNeedsIng => write!(
                f,
                "For the present continuous, use a V-ing form like 'walking' (simplified here)."
            ),
            Verdict::PresentCorrect(s) => write!(f, "Well done! Present time logic applied: {}", s),
            Verdict::AddTimeMarker => write!(
                f,
                "Try adding a time marker to make the logic clearer (e.g. 'yesterday' or 'now')."
            ),
        }
    }
}

/// Judges the tense of `sentence` against its time marker.
pub fn check(sentence: &Sentence) -> Verdict {
    let aux = sentence.aux.as_deref();
    let verb = sentence.verb.as_deref();
    match sentence.time.as_deref() {
        Some("yesterday") => {
            if aux == Some("is") {
                Verdict::PastNeedsWasWere
            } else if verb == Some("walk") {
                Verdict::PastNeedsV2
            } else {
                Verdict::PastCorrect(sentence.text())
            }
        }
        Some("now") => {
            if aux != Some("is") {
                Verdict::PresentNeedsIs
            } else if verb != Some("walk") {
                Verdict::PresentNeedsIng
            } else {
                Verdict::PresentCorrect(sentence.text())
            }
        }
        _ => Verdict::AddTimeMarker,
    }
}

/// Lets the user fill the slots from the word bank and prints the verdict.
pub fn sentence() -> Result<()> {
    let mut stdout_lock = stdout().lock();
    let sentence = build_sentence(&mut stdin().lock(), &mut stdout_lock)?;
    let verdict = check(&sentence);
    debug!(?sentence, ?verdict, "checked sentence");
    writeln!(stdout_lock, "{}", verdict)?;
    Ok(())
}

// Each bank word can be placed once. Empty input leaves a slot empty.
fn build_sentence<R, W>(mut stdin: R, mut stdout: W) -> Result<Sentence>
where
    R: BufRead,
    W: Write,
{
    writeln!(stdout, "Word bank: {}\n", BANK.join(", "))?;
    let mut bank: Vec<&str> = BANK.to_vec();
    let mut placed: Vec<Option<String>> = Vec::with_capacity(SLOTS.len());

    for slot in SLOTS {
        loop {
            write!(stdout, "{}: ", slot)?;
            stdout.flush()?;
            let input = read_line(&mut stdin)?;
            let input = input.trim();
            if input.is_empty() {
                placed.push(None);
                break;
            }
            match bank.iter().position(|w| w.eq_ignore_ascii_case(input)) {
                Some(i) => {
                    placed.push(Some(bank.remove(i).to_string()));
                    break;
                }
                None => {
                    warn!(input, "word not in bank");
                    writeln!(stdout, "'{}' is not left in the word bank.", input)?;
                }
            }
        }
    }
    writeln!(stdout)?;

    let mut placed = placed.into_iter();
    Ok(Sentence {
        subject: placed.next().flatten(),
        aux: placed.next().flatten(),
        verb: placed.next().flatten(),
        time: placed.next().flatten(),
    })
}

#[cfg(test)]
fn sentence_of(words: [&str; 4]) -> Sentence {
    let slot = |w: &str| Some(w.to_string()).filter(|w| !w.is_empty());
    Sentence {
        subject: slot(words[0]),
        aux: slot(words[1]),
        verb: slot(words[2]),
        time: slot(words[3]),
    }
}

#[test]
fn test_past_tense() {
    assert_eq!(
        check(&sentence_of(["She", "is", "walked", "yesterday"])),
        Verdict::PastNeedsWasWere
    );
    assert_eq!(
        check(&sentence_of(["I", "was", "walk", "yesterday"])),
        Verdict::PastNeedsV2
    );
    assert_eq!(
        check(&sentence_of(["I", "", "walked", "yesterday"])),
        Verdict::PastCorrect(String::from("I walked yesterday."))
    );
}

#[test]
fn test_present_tense() {
    assert_eq!(
        check(&sentence_of(["She", "was", "walk", "now"])),
        Verdict::PresentNeedsIs
    );
    assert_eq!(
        check(&sentence_of(["She", "is", "walked", "now"])),
        Verdict::PresentNeedsIng
    );
    assert_eq!(
        check(&sentence_of(["She", "is", "walk", "now"])),
        Verdict::PresentCorrect(String::from("She is walk now."))
    );
}

#[test]
fn test_missing_time_marker() {
    assert_eq!(
        check(&sentence_of(["I", "was", "walked", "to school"])),
        Verdict::AddTimeMarker
    );
    assert_eq!(check(&Sentence::default()), Verdict::AddTimeMarker);
}

#[test]
fn test_build_sentence() {
    use std::io::Cursor;

    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"she\nrun\nShe\nis\n\nYesterday\n");
    let sentence = build_sentence(&mut stdin, &mut stdout).unwrap();
    assert_eq!(sentence, sentence_of(["She", "is", "", "yesterday"]));
    assert_eq!(check(&sentence), Verdict::PastNeedsWasWere);

    // Check prompts: a word can only be placed once
    let stdout_vec = stdout.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&stdout_vec),
        concat!(
            "Word bank: I, She, was, is, walk, walked, to school, yesterday, now\n\n",
            "Subject: Aux: 'run' is not left in the word bank.\n",
            "Aux: 'She' is not left in the word bank.\n",
            "Aux: Verb: Object/Time: \n",
        )
    );
}
