use thiserror::Error;

/// Rejected form input. The whole create or edit is aborted and no state
/// changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("fee must be a whole number, got {raw:?}")]
    InvalidFee { raw: String },

    #[error("fee must not be negative, got {value}")]
    NegativeFee { value: i64 },

    #[error("rating must be a number, got {raw:?}")]
    InvalidRating { raw: String },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse seed profiles: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate profile id {id} in seed")]
    DuplicateId { id: u64 },

    #[error("profile {name:?} has id 0; ids must be positive")]
    ZeroId { name: String },
}
