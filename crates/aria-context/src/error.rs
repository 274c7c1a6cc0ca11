use aria_persist::PersistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    /// One of the data store lookups failed; the build is abandoned as a whole
    #[error("Failed to load user context: {0}")]
    Store(#[from] PersistError),
}
