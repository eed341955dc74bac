/// Convenience result type used across frameseq.
pub type FrameseqResult<T> = Result<T, FrameseqError>;

/// Top-level error taxonomy used by export and folder APIs.
#[derive(thiserror::Error, Debug)]
pub enum FrameseqError {
    /// Invalid user-provided parameters or an unusable frame sequence.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while waiting on or inspecting export results.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// The external program could not be launched at all.
    #[error("failed to spawn '{program}' (is it installed and on PATH?): {source}")]
    Spawn {
        /// Program that was being launched.
        program: String,
        /// Underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// The external program ran but exited unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", exit_label(.code))]
    Encode {
        /// Program that failed.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The display collaborator could not read back the exported file.
    #[error("display error: {0}")]
    Display(String),

    /// Errors when serializing or deserializing job files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameseqError {
    /// Build a [`FrameseqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameseqError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FrameseqError::Display`] value.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// Build a [`FrameseqError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
