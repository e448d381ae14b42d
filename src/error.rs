#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A constructor was handed a configuration the code family cannot
    /// represent, e.g. a constraint length of 1 or a matrix whose
    /// dimensions are not multiples of 8.
    #[error("Invalid code config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
