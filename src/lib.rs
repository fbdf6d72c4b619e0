pub mod add;
pub mod conversation;
pub mod deck;
pub mod error;
pub mod init;
pub mod journal;
pub mod lookup;
pub mod models;
pub mod progress;
pub mod review;
pub mod scheduler;
pub mod sentence;
pub mod stats;
pub mod utils;

pub use deck::Deck;
pub use error::Error;
pub use models::{Rating, ReviewCard, ReviewEvent, VocabEntry};
pub use scheduler::{schedule_next_review, schedule_next_review_str, Scheduler, SchedulerConfig};
