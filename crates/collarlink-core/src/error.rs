use thiserror::Error;

/// Unified error type for the core crate.
///
/// Stores and controllers catch these at their boundary and convert them
/// into `Failed`/`Error` state variants -- the rendered message is what
/// observers see.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An authenticated intent was issued while the credential store
    /// holds no session. Checked locally, before any call goes out.
    #[error("not signed in")]
    NotSignedIn,

    /// Anything the API layer reported: transport failure, non-2xx
    /// status, empty body, undecodable body.
    #[error(transparent)]
    Api(#[from] collarlink_api::Error),
}

impl CoreError {
    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::NotSignedIn => true,
            Self::Api(e) => e.is_unauthorized(),
        }
    }
}
