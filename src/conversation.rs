use crate::utils::read_line;
use anyhow::Result;
use regex::Regex;
use std::io::{stdin, stdout, BufRead, Write};
use std::sync::LazyLock;
use tracing::info;

static COFFEE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"coffee|latte|espresso").unwrap());
static INTERVIEW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"i am|my name").unwrap());
static DIRECTIONS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"how|where|get").unwrap());

pub const GREETING: &str = "Hi! Let's practice. Type your line when you're ready.";
const FALLBACK: &str = "Good! Try adding a polite opener like 'Could I...?'";

/// A role-play situation to practice.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    Coffee,
    Interview,
    Directions,
}

impl Scenario {
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Coffee => "Ordering coffee",
            Scenario::Interview => "Job interview",
            Scenario::Directions => "Asking for directions",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Scenario::Coffee => "Order a coffee politely.",
            Scenario::Interview => "Answer: Tell me about yourself.",
            Scenario::Directions => "Ask how to get to the station.",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Scenario::Coffee => &*COFFEE_RE,
            Scenario::Interview => &*INTERVIEW_RE,
            Scenario::Directions => &*DIRECTIONS_RE,
        }
    }

    fn hit(&self) -> &'static str {
        match self {
            Scenario::Coffee => {
                "Great order! Add size and sweetness, e.g., 'A small latte with less sugar, please.'"
            }
            Scenario::Interview => "Nice start. Add a key strength + example in one sentence.",
            Scenario::Directions => "Good question. Remember a follow-up: 'How long does it take?'",
        }
    }

    /// Scripted reply to one line of the learner. Blank lines get none.
    pub fn reply(&self, line: &str) -> Option<&'static str> {
        if line.trim().is_empty() {
            return None;
        }
        if self.pattern().is_match(&line.to_lowercase()) {
            Some(self.hit())
        } else {
            Some(FALLBACK)
        }
    }
}

/// Runs a conversation until an empty line.
pub fn converse(scenario: Scenario) -> Result<()> {
    let turns = run_conversation(scenario, &mut stdin().lock(), &mut stdout().lock())?;
    info!(?scenario, turns, "conversation finished");
    Ok(())
}

// Returns the number of learner turns.
fn run_conversation<R, W>(scenario: Scenario, mut stdin: R, mut stdout: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(stdout, "{}: {}", scenario.title(), scenario.prompt())?;
    writeln!(stdout, "AI: {}", GREETING)?;
    let mut turns = 0;
    loop {
        write!(stdout, "You: ")?;
        stdout.flush()?;
        let line = read_line(&mut stdin)?;
        writeln!(stdout)?;
        match scenario.reply(&line) {
            Some(reply) => {
                turns += 1;
                writeln!(stdout, "AI: {}", reply)?;
            }
            None => return Ok(turns),
        }
    }
}

#[test]
fn test_replies() {
    assert_eq!(
        Scenario::Coffee.reply("A Latte, please"),
        Some("Great order! Add size and sweetness, e.g., 'A small latte with less sugar, please.'")
    );
    assert_eq!(
        Scenario::Interview.reply("My name is Lina"),
        Some("Nice start. Add a key strength + example in one sentence.")
    );
    assert_eq!(
        Scenario::Directions.reply("Where is the station?"),
        Some("Good question. Remember a follow-up: 'How long does it take?'")
    );
    assert_eq!(Scenario::Coffee.reply("Hello there"), Some(FALLBACK));
    // Keywords only count in their own scenario
    assert_eq!(Scenario::Interview.reply("One coffee"), Some(FALLBACK));
    assert_eq!(Scenario::Coffee.reply("   "), None);
}

#[test]
fn test_run_conversation() {
    use std::io::Cursor;

    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"Hi\nCould I get an espresso?\n\n");
    let turns = run_conversation(Scenario::Coffee, &mut stdin, &mut stdout).unwrap();
    assert_eq!(turns, 2);

    let stdout_vec = stdout.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&stdout_vec),
        concat!(
            "Ordering coffee: Order a coffee politely.\n",
            "AI: Hi! Let's practice. Type your line when you're ready.\n",
            "You: \nAI: Good! Try adding a polite opener like 'Could I...?'\n",
            "You: \nAI: Great order! Add size and sweetness, e.g., 'A small latte with less sugar, please.'\n",
            "You: \n",
        )
    );
}
