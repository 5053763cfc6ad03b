/// Error enumeration shared by every repository trait.
///
/// Repositories are the only seam to the backing document store, so this is
/// deliberately small: uniqueness violations, missing records, and transport
/// failures. Services translate `NotFound` into their own domain errors where
/// the resource name matters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
