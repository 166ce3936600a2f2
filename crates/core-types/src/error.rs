use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("'{0}' is not a recognized timeframe")]
    InvalidTimeframe(String),
}
