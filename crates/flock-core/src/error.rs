//! Error types for `flock-core`.

use thiserror::Error;
use uuid::Uuid;

/// A rejected add/update form. The message is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("site name is required")]
  EmptyName,

  #[error("client name is required")]
  EmptyClient,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("site not found: {0}")]
  SiteNotFound(Uuid),

  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
