use thiserror::Error;

/// Errors from the credential store's persistence layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Reading or writing the persisted blob failed.
    #[error("credential store I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The persisted blob is not valid JSON of the expected shape.
    #[error("credential store parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
