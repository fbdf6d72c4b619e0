use crate::deck::Deck;
use crate::error::Error;
use crate::models::{Rating, ReviewCard};
use crate::scheduler::{Scheduler, SchedulerConfig};
use crate::stats::stats;
use crate::utils::{clear, format_interval, load_vocabulary, plural, read_line};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::{stdin, stdout, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Builds a deck from the words in `path` and lets the user review every due card once.
pub fn review(path: &Path, config: SchedulerConfig) -> Result<()> {
    let mut stdout_lock = stdout().lock();
    let mut stdin_lock = stdin().lock();
    let entries = load_vocabulary(path)?;
    if entries.is_empty() {
        writeln!(stdout_lock, "No words to review in {:?}", path)?;
        return Ok(());
    }

    let now = Utc::now();
    let mut deck = Deck::new();
    for entry in &entries {
        deck.save_selection(entry, entry.example.as_deref().unwrap_or(""), now);
    }
    info!(?path, cards = deck.len(), "built deck");

    clear(&mut stdout_lock)?;
    writeln!(stdout_lock, "Reviewing words in {:?}", path)?;
    let scheduler = Scheduler::new(config);
    let num_reviews = review_due_cards(
        &mut deck,
        &scheduler,
        Utc::now,
        &mut stdin_lock,
        &mut stdout_lock,
    )?;
    info!(num_reviews, "review session finished");

    writeln!(
        stdout_lock,
        "{} review{} of {} card{}. Done.\n",
        num_reviews,
        plural(num_reviews as i64),
        deck.len(),
        plural(deck.len() as i64)
    )?;
    writeln!(stdout_lock, "{}", stats(&deck, Utc::now()))?;
    Ok(())
}

/// Walks the due queue in deck order and rates each card. Returns the number of reviews.
fn review_due_cards<C, R, W>(
    deck: &mut Deck,
    scheduler: &Scheduler,
    clock: C,
    mut stdin: R,
    mut stdout: W,
) -> Result<usize>
where
    C: Fn() -> DateTime<Utc>,
    R: BufRead,
    W: Write,
{
    let queue: Vec<String> = deck
        .due(clock())
        .into_iter()
        .map(|c| c.id.clone())
        .collect();
    writeln!(
        stdout,
        "{} card{} due\n",
        queue.len(),
        plural(queue.len() as i64)
    )?;

    for (i, id) in queue.iter().enumerate() {
        let card = deck
            .get(id)
            .ok_or_else(|| Error::UnknownCard(id.clone()))?;
        writeln!(stdout, "[{}/{}]", i + 1, queue.len())?;
        show_card(card, &mut stdin, &mut stdout)?;

        let rating = read_rating(&mut stdin, &mut stdout)?;
        let card = deck.review(id, rating, scheduler, clock())?;
        if let Some(interval) = card.interval() {
            writeln!(stdout, "Next review in {}\n", format_interval(interval))?;
        }
    }
    Ok(queue.len())
}

// Shows the word, waits for Enter, then reveals the rest.
fn show_card<R, W>(card: &ReviewCard, stdin: &mut R, stdout: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    if !card.context.is_empty() {
        writeln!(stdout, "C: {}", card.context)?;
    }
    write!(stdout, "W: {}", card.word)?;
    stdout.flush()?;
    let _: String = read_line(&mut *stdin)?;
    writeln!(stdout)?;

    if let Some(meaning) = &card.meaning {
        writeln!(stdout, "M: {}", meaning)?;
    }
    if let Some(ipa) = &card.ipa {
        writeln!(stdout, "IPA: {}", ipa)?;
    }
    if !card.collocations.is_empty() {
        writeln!(stdout, "Collocations: {}", card.collocations.join(", "))?;
    }
    Ok(())
}

// Prompts until the input is a valid rating.
fn read_rating<R, W>(stdin: &mut R, stdout: &mut W) -> Result<Rating>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(stdout, "Rating (again/good/easy): ")?;
        stdout.flush()?;
        let input = read_line(&mut *stdin)?;
        match input.parse::<Rating>() {
            Ok(rating) => return Ok(rating),
            Err(e) => {
                warn!(%e, "rejected rating");
                writeln!(stdout, "{}", e)?;
            }
        }
    }
}

#[cfg(test)]
fn sample_deck(now: DateTime<Utc>) -> Deck {
    use chrono::TimeDelta;

    let mut deck = Deck::new();
    let mut decision = ReviewCard::new("decision", "decision", "I made a decision to study daily.");
    decision.meaning = Some(String::from("a choice that you make"));
    decision.ipa = Some(String::from("/dɪˈsɪʒ.ən/"));
    decision.collocations = vec![
        String::from("make a decision"),
        String::from("tough decision"),
    ];
    let mut coffee = ReviewCard::new("coffee", "coffee", "");
    coffee.interval_ms = Some(86_400_000);
    coffee.due_at = Some(now + TimeDelta::hours(2));
    let huge = ReviewCard::new("huge", "huge", "");
    for card in [decision, coffee, huge] {
        deck.insert(card).unwrap();
    }
    deck
}

#[test]
fn test_review_due_cards() {
    use std::io::Cursor;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = sample_deck(now);
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"\nhard\ngood\n\ne\n");
    let result = review_due_cards(
        &mut deck,
        &Scheduler::default(),
        || now,
        &mut stdin,
        &mut stdout,
    );
    assert_eq!(result.unwrap(), 2);

    // Check prompts
    let stdout_vec = stdout.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&stdout_vec),
        concat!(
            "2 cards due\n\n",
            "[1/2]\n",
            "C: I made a decision to study daily.\n",
            "W: decision\n",
            "M: a choice that you make\n",
            "IPA: /dɪˈsɪʒ.ən/\n",
            "Collocations: make a decision, tough decision\n",
            "Rating (again/good/easy): ",
            "Invalid rating \"hard\", expected one of: again, good, easy\n",
            "Rating (again/good/easy): ",
            "Next review in 1 day\n\n",
            "[2/2]\n",
            "W: huge\n",
            "Rating (again/good/easy): ",
            "Next review in 3 days\n\n",
        )
    );

    // Check that cards were rescheduled and the untouched one kept
    let decision = deck.get("decision").unwrap();
    assert_eq!(decision.interval_ms, Some(86_400_000));
    assert_eq!(decision.history.len(), 1);
    assert_eq!(decision.history[0].rating, Rating::Good);
    let huge = deck.get("huge").unwrap();
    assert_eq!(huge.interval_ms, Some(259_200_000));
    assert_eq!(huge.history[0].rating, Rating::Easy);
    assert!(deck.get("coffee").unwrap().history.is_empty());
    assert_eq!(deck.due_count(now), 0);
}

#[test]
fn test_review_due_cards_stops_at_end_of_input() {
    use std::io::Cursor;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = sample_deck(now);
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"\n");
    let result = review_due_cards(
        &mut deck,
        &Scheduler::default(),
        || now,
        &mut stdin,
        &mut stdout,
    );

    assert_eq!(
        result.unwrap_err().to_string(),
        "Unexpected end of input. Aborting."
    );
    assert!(deck.get("decision").unwrap().history.is_empty());
}

#[test]
fn test_nothing_due() {
    use std::io::Cursor;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"");
    let result = review_due_cards(
        &mut deck,
        &Scheduler::default(),
        || now,
        &mut stdin,
        &mut stdout,
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(String::from_utf8_lossy(&stdout.into_inner()), "0 cards due\n\n");
}
