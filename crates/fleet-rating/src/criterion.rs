use std::fmt;
use std::str::FromStr;

use crate::RatingError;

/// What a rater measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RatingCriterion {
    /// Lateness against delivery windows.
    InTime,
    /// Share of received orders that were delivered.
    AmountDelivered,
}

impl RatingCriterion {
    pub const ALL: [RatingCriterion; 2] = [RatingCriterion::InTime, RatingCriterion::AmountDelivered];

    pub fn name(self) -> &'static str {
        match self {
            RatingCriterion::InTime => "in_time",
            RatingCriterion::AmountDelivered => "amount_delivered",
        }
    }
}

impl fmt::Display for RatingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RatingCriterion {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| RatingError::UnknownCriterion(s.to_owned()))
    }
}
