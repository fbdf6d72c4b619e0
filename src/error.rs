use thiserror::Error;

/// Errors raised by the scheduler and the deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rating other than `again`, `good` or `easy`.
    #[error("Invalid rating {0:?}, expected one of: again, good, easy")]
    InvalidRating(String),

    #[error("No card with id {0:?} in the deck")]
    UnknownCard(String),

    #[error("A card with id {0:?} already exists in the deck")]
    DuplicateCard(String),
}
