use crate::error::Error;
use crate::models::{Rating, ReviewCard, VocabEntry};
use crate::scheduler::Scheduler;
use chrono::{DateTime, Utc};
use tracing::debug;

/// The cards under review, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<ReviewCard>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewCard> {
        self.cards.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ReviewCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn insert(&mut self, card: ReviewCard) -> Result<(), Error> {
        if self.get(&card.id).is_some() {
            return Err(Error::DuplicateCard(card.id));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Creates a card for `entry` as seen in `context` and appends it.
    pub fn save_selection(
        &mut self,
        entry: &VocabEntry,
        context: &str,
        now: DateTime<Utc>,
    ) -> &ReviewCard {
        let id = self.fresh_id(&entry.word, now);
        let mut card = ReviewCard::new(id, entry.word.trim(), context);
        card.meaning = Some(entry.meaning.clone()).filter(|m| !m.is_empty());
        card.ipa = entry.ipa.clone();
        card.collocations = entry.collocation_list();
        debug!(card = %card.id, "saved card");
        let i = self.cards.len();
        self.cards.push(card);
        &self.cards[i]
    }

    // <word>-<millis>, suffixed with a counter while taken
    fn fresh_id(&self, word: &str, now: DateTime<Utc>) -> String {
        let slug = word
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        let base = format!("{}-{}", slug, now.timestamp_millis());
        let mut id = base.clone();
        let mut n = 2;
        while self.get(&id).is_some() {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        id
    }

    /// Cards due at `now`, in insertion order.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<&ReviewCard> {
        self.cards.iter().filter(|c| c.is_due(now)).collect()
    }

    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|c| c.is_due(now)).count()
    }

    /// Rates the card with the given id and stores its rescheduled state.
    pub fn review(
        &mut self,
        id: &str,
        rating: Rating,
        scheduler: &Scheduler,
        now: DateTime<Utc>,
    ) -> Result<&ReviewCard, Error> {
        let slot = self
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::UnknownCard(id.to_string()))?;
        *slot = scheduler.schedule(slot, rating, now);
        Ok(&*slot)
    }
}

#[cfg(test)]
fn entry(word: &str, meaning: &str) -> VocabEntry {
    VocabEntry {
        word: String::from(word),
        meaning: String::from(meaning),
        ipa: None,
        example: None,
        collocations: None,
    }
}

#[test]
fn test_save_selection() {
    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let mut decision = entry("decision", "a choice that you make");
    decision.ipa = Some(String::from("/dɪˈsɪʒ.ən/"));
    decision.collocations = Some(String::from("make a decision;tough decision"));

    let card = deck.save_selection(&decision, "I made a decision to study daily.", now);
    assert_eq!(card.id, "decision-1750000000000");
    assert_eq!(card.word, "decision");
    assert_eq!(card.context, "I made a decision to study daily.");
    assert_eq!(card.meaning.as_deref(), Some("a choice that you make"));
    assert_eq!(card.ipa.as_deref(), Some("/dɪˈsɪʒ.ən/"));
    assert_eq!(card.collocations, vec!["make a decision", "tough decision"]);
    assert_eq!(card.ease, 2.0);
    assert_eq!(card.interval_ms, None);
    assert_eq!(card.due_at, None);
    assert!(card.history.is_empty());
}

#[test]
fn test_save_selection_keeps_ids_unique() {
    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let first = deck.save_selection(&entry("Job interview", "x"), "", now).id.clone();
    let second = deck.save_selection(&entry("job  interview", "x"), "", now).id.clone();
    let third = deck.save_selection(&entry("job interview", "x"), "", now).id.clone();
    assert_eq!(first, "job-interview-1750000000000");
    assert_eq!(second, "job-interview-1750000000000-2");
    assert_eq!(third, "job-interview-1750000000000-3");
    assert_eq!(deck.len(), 3);
}

#[test]
fn test_insert_rejects_duplicate_id() {
    let mut deck = Deck::new();
    deck.insert(ReviewCard::new("a", "a", "")).unwrap();
    assert_eq!(
        deck.insert(ReviewCard::new("a", "b", "")),
        Err(Error::DuplicateCard(String::from("a")))
    );
    assert_eq!(deck.len(), 1);
}

#[test]
fn test_due_keeps_insertion_order() {
    use chrono::TimeDelta;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let mut later = ReviewCard::new("later", "later", "");
    later.due_at = Some(now + TimeDelta::minutes(1));
    let mut late = ReviewCard::new("late", "late", "");
    late.due_at = Some(now - TimeDelta::minutes(1));
    let mut overdue = ReviewCard::new("overdue", "overdue", "");
    overdue.due_at = Some(now - TimeDelta::days(3));
    let fresh = ReviewCard::new("fresh", "fresh", "");
    let mut exact = ReviewCard::new("exact", "exact", "");
    exact.due_at = Some(now);
    for card in [later, late, overdue, fresh, exact] {
        deck.insert(card).unwrap();
    }

    let due: Vec<&str> = deck.due(now).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(due, vec!["late", "overdue", "fresh", "exact"]);
    assert_eq!(deck.due_count(now), 4);
}

#[test]
fn test_review_replaces_card() {
    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let scheduler = Scheduler::default();
    let mut deck = Deck::new();
    deck.insert(ReviewCard::new("a", "a", "")).unwrap();
    deck.insert(ReviewCard::new("b", "b", "")).unwrap();

    let reviewed = deck.review("b", Rating::Good, &scheduler, now).unwrap();
    assert_eq!(reviewed.interval_ms, Some(86_400_000));

    assert_eq!(deck.get("b").unwrap().history.len(), 1);
    assert!(deck.get("a").unwrap().history.is_empty());
    let due: Vec<&str> = deck.due(now).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(due, vec!["a"]);
}

#[test]
fn test_review_unknown_card() {
    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let result = deck.review("missing", Rating::Good, &Scheduler::default(), now);
    assert_eq!(result, Err(Error::UnknownCard(String::from("missing"))));
}
