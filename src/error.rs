use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Session bus or notification daemon unreachable at construction
    #[error("desktop notifications unavailable")]
    Unavailable(#[source] zbus::Error),

    /// A single call to the daemon failed
    #[error("notification call failed")]
    Transport(#[source] zbus::Error),
}

impl Error {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
