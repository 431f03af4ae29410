use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("invalid update frequency: {0}")]
    InvalidFrequency(String),
    #[error("invalid end time: {0}")]
    InvalidEndTime(String),
}
