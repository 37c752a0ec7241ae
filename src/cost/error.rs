//! Cost query errors

use crate::sources::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostError {
    /// A date (or year/month pair) is not a valid calendar date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    DateFormat { value: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}
