//! Crate-level error types.

use std::fmt;

/// Errors produced by the foldview crate.
#[derive(Debug)]
pub enum FoldError {
    /// Paper width or height is not a positive, finite number.
    InvalidDimension {
        /// Requested sheet width in inches.
        width: f32,
        /// Requested sheet height in inches.
        height: f32,
    },
    /// Fold topology id outside the enumerated set.
    UnknownFoldType(String),
    /// Parent links do not form a forest rooted at the base panel(s).
    MalformedPanelTree {
        /// Index of the offending panel.
        panel: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// Fold progress was NaN or infinite.
    InvalidProgress(f32),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl FoldError {
    pub(crate) fn malformed(panel: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPanelTree {
            panel,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid paper size {width} x {height} in")
            }
            Self::UnknownFoldType(id) => write!(f, "unknown fold type '{id}'"),
            Self::MalformedPanelTree { panel, reason } => {
                write!(f, "malformed panel tree at panel {panel}: {reason}")
            }
            Self::InvalidProgress(p) => write!(f, "invalid fold progress {p}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for FoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FoldError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
