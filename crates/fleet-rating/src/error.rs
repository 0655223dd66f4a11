use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("unknown rating criterion {0:?}")]
    UnknownCriterion(String),
}

pub type RatingResult<T> = Result<T, RatingError>;
