//! Error type for `flock-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] flock_core::Error),

  /// A writer panicked while holding the collection lock.
  #[error("site collection lock poisoned")]
  Poisoned,
}

impl Error {
  /// The validation failure behind this error, if any. The presentation
  /// layer shows it to the user instead of treating it as a fault.
  pub fn validation(&self) -> Option<flock_core::ValidationError> {
    match self {
      Self::Core(flock_core::Error::Validation(e)) => Some(*e),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Core(flock_core::Error::SiteNotFound(_)))
  }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
  fn from(_: std::sync::PoisonError<T>) -> Self { Self::Poisoned }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
