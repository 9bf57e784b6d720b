use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PathlossError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid sweep step {0}, must be positive and finite")]
    SweepStep(f64),

    #[error("sweep stop {stop} is before start {start}")]
    SweepRange { start: f64, stop: f64 },

    #[error("unknown material '{0}'")]
    Material(String),
}
