use crate::deck::Deck;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Cards per length of their next review interval.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub new: u64,
    pub hour: u64,
    pub day: u64,
    pub day_exact: u64,
    pub week: u64,
    pub month: u64,
    pub more: u64,
    pub due: u64,
}

impl Counts {
    fn increment_count(&mut self, interval: Option<TimeDelta>) {
        match interval {
            None => self.new += 1,
            Some(i) if i < TimeDelta::hours(1) => self.hour += 1,
            Some(i) if i < TimeDelta::days(1) => self.day += 1,
            Some(i) if i == TimeDelta::days(1) => self.day_exact += 1,
            Some(i) if i < TimeDelta::days(7) => self.week += 1,
            Some(i) if i < TimeDelta::days(30) => self.month += 1,
            Some(_) => self.more += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.new + self.hour + self.day + self.day_exact + self.week + self.month + self.more
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            concat!(
                "Next review intervals:\n",
                "  new      {}\n",
                "  <hour    {}\n",
                "  <day     {}\n",
                "  =day     {}\n",
                "  <week    {}\n",
                "  <month   {}\n",
                "  >=month  {}\n\n",
                "Due now: {}\n",
                "Total: {}"
            ),
            self.new,
            self.hour,
            self.day,
            self.day_exact,
            self.week,
            self.month,
            self.more,
            self.due,
            self.total(),
        )
    }
}

pub fn stats(deck: &Deck, now: DateTime<Utc>) -> Counts {
    let mut counts = Counts::default();
    for card in deck.iter() {
        counts.increment_count(card.interval());
        if card.is_due(now) {
            counts.due += 1;
        }
    }
    counts
}

#[test]
fn test_stats() {
    use crate::models::ReviewCard;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    let intervals = [
        None,
        Some(300_000),
        Some(86_400_000),
        Some(120_960_000),
        Some(259_200_000 * 4),
        Some(86_400_000 * 30),
    ];
    for (i, interval_ms) in intervals.into_iter().enumerate() {
        let mut card = ReviewCard::new(i.to_string(), "w", "");
        card.interval_ms = interval_ms;
        card.due_at = interval_ms.map(|ms| now + TimeDelta::milliseconds(ms));
        deck.insert(card).unwrap();
    }

    let counts = stats(&deck, now);
    assert_eq!(
        counts,
        Counts {
            new: 1,
            hour: 1,
            day: 0,
            day_exact: 1,
            week: 1,
            month: 1,
            more: 1,
            due: 1,
        }
    );
    assert_eq!(counts.total(), 6);
    assert!(counts.to_string().ends_with("Due now: 1\nTotal: 6"));
}

#[test]
fn test_first_good_review_counts_as_one_day() {
    use crate::models::ReviewCard;
    use crate::models::Rating;
    use crate::scheduler::Scheduler;

    let now = DateTime::from_timestamp_millis(1_750_000_000_000).unwrap();
    let mut deck = Deck::new();
    deck.insert(ReviewCard::new("coffee", "coffee", "")).unwrap();
    deck.insert(ReviewCard::new("huge", "huge", "")).unwrap();
    deck.review("coffee", Rating::Good, &Scheduler::default(), now)
        .unwrap();

    let counts = stats(&deck, now);
    assert_eq!(counts.day_exact, 1);
    assert_eq!(counts.week, 0);
    assert_eq!(counts.new, 1);
    assert_eq!(counts.due, 1);
    assert!(counts.to_string().contains("  =day     1\n"));
}
