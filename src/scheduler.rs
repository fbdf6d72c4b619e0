//! Review scheduling.
//!
//! A first review lands 5 minutes (`again`), 1 day (`good`) or 3 days
//! (`easy`) out. Later reviews scale the previous interval by 0.5, 1.4 or
//! 2.0. Ease is adjusted by 0.9, 1.0 or 1.15 and kept within
//! [`MIN_EASE`, `MAX_EASE`]; it is recorded but does not feed the interval.

use crate::error::Error;
use crate::models::{Rating, ReviewCard, ReviewEvent, DEFAULT_EASE};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

pub const MIN_EASE: f64 = 1.3;
pub const MAX_EASE: f64 = 2.5;

/// Upper bound on a single interval, keeps due dates representable.
pub const MAX_INTERVAL: TimeDelta = TimeDelta::days(36_500);

impl Rating {
    fn first_interval(self) -> TimeDelta {
        match self {
            Rating::Again => TimeDelta::minutes(5),
            Rating::Good => TimeDelta::days(1),
            Rating::Easy => TimeDelta::days(3),
        }
    }

    fn ease_factor(self) -> f64 {
        match self {
            Rating::Again => 0.9,
            Rating::Good => 1.0,
            Rating::Easy => 1.15,
        }
    }

    fn interval_factor(self) -> f64 {
        match self {
            Rating::Again => 0.5,
            Rating::Good => 1.4,
            Rating::Easy => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SchedulerConfig {
    /// Floor for the next interval. `None` lets repeated `again` ratings
    /// shrink the interval down to a single millisecond.
    pub min_interval: Option<TimeDelta>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Scheduler { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns the state of `card` after being rated at `now`. The given card is left untouched.
    pub fn schedule(&self, card: &ReviewCard, rating: Rating, now: DateTime<Utc>) -> ReviewCard {
        let current = if card.ease.is_finite() {
            card.ease
        } else {
            DEFAULT_EASE
        };
        let ease = (current * rating.ease_factor()).clamp(MIN_EASE, MAX_EASE);

        let mut interval_ms = match card.interval_ms {
            Some(previous) if previous > 0 => scale(previous, rating.interval_factor()),
            _ => rating.first_interval().num_milliseconds(),
        };
        if let Some(floor) = self.config.min_interval {
            interval_ms = interval_ms.max(floor.num_milliseconds());
        }
        interval_ms = interval_ms.min(MAX_INTERVAL.num_milliseconds());
        let due_at = now + TimeDelta::milliseconds(interval_ms);

        let mut history = Vec::with_capacity(card.history.len() + 1);
        history.extend_from_slice(&card.history);
        history.push(ReviewEvent { at: now, rating });

        debug!(
            card = %card.id,
            %rating,
            ease,
            interval_ms,
            due_at = %due_at,
            "scheduled next review"
        );

        ReviewCard {
            ease,
            interval_ms: Some(interval_ms),
            due_at: Some(due_at),
            history,
            ..card.clone()
        }
    }

    /// Same as [`Scheduler::schedule`], reading the clock.
    pub fn schedule_now(&self, card: &ReviewCard, rating: Rating) -> ReviewCard {
        self.schedule(card, rating, Utc::now())
    }
}

/// Schedules with the default configuration.
pub fn schedule_next_review(card: &ReviewCard, rating: Rating, now: DateTime<Utc>) -> ReviewCard {
    Scheduler::default().schedule(card, rating, now)
}

/// Schedules from a textual rating, rejecting anything but `again`, `good` and `easy`.
pub fn schedule_next_review_str(
    card: &ReviewCard,
    rating: &str,
    now: DateTime<Utc>,
) -> Result<ReviewCard, Error> {
    let rating: Rating = rating.parse()?;
    Ok(schedule_next_review(card, rating, now))
}

// Rounded to whole milliseconds, never below one.
fn scale(interval_ms: i64, factor: f64) -> i64 {
    ((interval_ms as f64) * factor).round().max(1.0) as i64
}

#[cfg(test)]
fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

#[cfg(test)]
const T: i64 = 1_750_000_000_000;

#[test]
fn test_first_review_intervals() {
    let card = ReviewCard::new("decision-1", "decision", "I made a decision to study daily.");
    let now = at(T);

    let again = schedule_next_review(&card, Rating::Again, now);
    assert_eq!(again.due_at, Some(now + TimeDelta::minutes(5)));
    assert_eq!(again.interval_ms, Some(300_000));

    let good = schedule_next_review(&card, Rating::Good, now);
    assert_eq!(good.due_at, Some(now + TimeDelta::days(1)));
    assert_eq!(good.interval_ms, Some(86_400_000));

    let easy = schedule_next_review(&card, Rating::Easy, now);
    assert_eq!(easy.due_at, Some(now + TimeDelta::days(3)));
    assert_eq!(easy.interval_ms, Some(259_200_000));
}

#[test]
fn test_subsequent_review_scales_previous_interval() {
    let mut card = ReviewCard::new("coffee-1", "coffee", "I ordered a cup of coffee.");
    card.interval_ms = Some(86_400_000);
    let now = at(T);

    let again = schedule_next_review(&card, Rating::Again, now);
    assert_eq!(again.interval_ms, Some(43_200_000));
    assert_eq!(again.due_at, Some(now + TimeDelta::milliseconds(43_200_000)));

    let good = schedule_next_review(&card, Rating::Good, now);
    assert_eq!(good.interval_ms, Some(120_960_000));

    let easy = schedule_next_review(&card, Rating::Easy, now);
    assert_eq!(easy.interval_ms, Some(172_800_000));
}

#[test]
fn test_new_card_rated_good_twice() {
    let card = ReviewCard::new("interview-1", "interview", "She has a job interview tomorrow.");
    let t1 = at(T);
    let t2 = at(T + 86_400_000);

    let first = schedule_next_review(&card, Rating::Good, t1);
    assert_eq!(first.due_at, Some(at(T + 86_400_000)));
    assert_eq!(first.ease, 2.0);
    assert_eq!(
        first.history,
        vec![ReviewEvent {
            at: t1,
            rating: Rating::Good
        }]
    );

    let second = schedule_next_review(&first, Rating::Good, t2);
    assert_eq!(second.interval_ms, Some(120_960_000));
    assert_eq!(second.due_at, Some(t2 + TimeDelta::milliseconds(120_960_000)));
}

#[test]
fn test_ease_stays_within_bounds() {
    let now = at(T);
    let starting_eases = [0.0, 1.0, 1.3, 1.5, 2.0, 2.5, 3.0, 10.0];
    // Every rating sequence of length 6
    for start in starting_eases {
        for n in 0..3usize.pow(6) {
            let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
            card.ease = start;
            let mut code = n;
            for _ in 0..6 {
                let rating = Rating::ALL[code % 3];
                code /= 3;
                card = schedule_next_review(&card, rating, now);
                assert!(
                    (MIN_EASE..=MAX_EASE).contains(&card.ease),
                    "ease {} out of bounds",
                    card.ease
                );
            }
        }
    }
}

#[test]
fn test_ease_adjustment() {
    let card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    let now = at(T);
    assert!((schedule_next_review(&card, Rating::Again, now).ease - 1.8).abs() < 1e-9);
    assert!((schedule_next_review(&card, Rating::Easy, now).ease - 2.3).abs() < 1e-9);

    let mut low = card.clone();
    low.ease = 1.3;
    assert_eq!(schedule_next_review(&low, Rating::Again, now).ease, MIN_EASE);

    let mut high = card;
    high.ease = 2.4;
    assert_eq!(schedule_next_review(&high, Rating::Easy, now).ease, MAX_EASE);
}

#[test]
fn test_non_finite_ease_falls_back_to_default() {
    let now = at(T);
    for start in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
        card.ease = start;
        for rating in Rating::ALL {
            let next = schedule_next_review(&card, rating, now);
            assert!((MIN_EASE..=MAX_EASE).contains(&next.ease));
        }
        assert_eq!(schedule_next_review(&card, Rating::Good, now).ease, DEFAULT_EASE);
    }
}

#[test]
fn test_history_appends_in_order() {
    let mut card = ReviewCard::new("directions-1", "directions", "We asked for directions.");
    card.history.push(ReviewEvent {
        at: at(T - 1000),
        rating: Rating::Easy,
    });
    let ratings = [Rating::Good, Rating::Again, Rating::Again, Rating::Easy];
    for (i, rating) in ratings.iter().enumerate() {
        card = schedule_next_review(&card, *rating, at(T + i as i64));
    }

    assert_eq!(card.history.len(), 1 + ratings.len());
    assert_eq!(card.history[0].rating, Rating::Easy);
    for (i, rating) in ratings.iter().enumerate() {
        assert_eq!(card.history[i + 1].rating, *rating);
        assert_eq!(card.history[i + 1].at, at(T + i as i64));
    }
}

#[test]
fn test_input_card_is_not_mutated() {
    let mut card = ReviewCard::new("coffee-1", "coffee", "I ordered a cup of coffee.");
    card.meaning = Some(String::from("a hot drink made from roasted beans"));
    card.collocations = vec![String::from("a cup of coffee")];
    let before = card.clone();

    let next = schedule_next_review(&card, Rating::Easy, at(T));
    assert_eq!(card, before);
    assert_eq!(next.id, before.id);
    assert_eq!(next.word, before.word);
    assert_eq!(next.context, before.context);
    assert_eq!(next.meaning, before.meaning);
    assert_eq!(next.collocations, before.collocations);
    assert_eq!(next.ipa, before.ipa);
}

#[test]
fn test_repeated_again_stays_in_the_future() {
    let now = at(T);
    let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    for _ in 0..64 {
        card = schedule_next_review(&card, Rating::Again, now);
        assert!(card.due_at.unwrap() > now);
    }
    assert_eq!(card.interval_ms, Some(1));
}

#[test]
fn test_min_interval_floor() {
    let scheduler = Scheduler::new(SchedulerConfig {
        min_interval: Some(TimeDelta::minutes(1)),
    });
    let now = at(T);
    let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    for _ in 0..10 {
        card = scheduler.schedule(&card, Rating::Again, now);
    }
    assert_eq!(card.interval_ms, Some(60_000));
    assert_eq!(card.due_at, Some(now + TimeDelta::minutes(1)));
}

#[test]
fn test_interval_is_capped() {
    let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    card.interval_ms = Some(MAX_INTERVAL.num_milliseconds());
    let next = schedule_next_review(&card, Rating::Easy, at(T));
    assert_eq!(next.interval(), Some(MAX_INTERVAL));
}

#[test]
fn test_zero_interval_counts_as_first_review() {
    let mut card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    card.interval_ms = Some(0);
    let next = schedule_next_review(&card, Rating::Good, at(T));
    assert_eq!(next.interval_ms, Some(86_400_000));
}

#[test]
fn test_schedule_from_text() {
    let card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    let next = schedule_next_review_str(&card, "easy", at(T)).unwrap();
    assert_eq!(next.interval_ms, Some(259_200_000));

    let result = schedule_next_review_str(&card, "hard", at(T));
    assert_eq!(result, Err(Error::InvalidRating(String::from("hard"))));
}

#[test]
fn test_schedule_now_reads_clock() {
    let card = ReviewCard::new("huge-1", "huge", "a huge improvement");
    let before = Utc::now();
    let next = Scheduler::default().schedule_now(&card, Rating::Good);
    let after = Utc::now();
    let due_at = next.due_at.unwrap();
    assert!(due_at >= before + TimeDelta::days(1));
    assert!(due_at <= after + TimeDelta::days(1));
}
