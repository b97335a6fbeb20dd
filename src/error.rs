//! Fatal errors and recovered diagnostics.

use crate::model::TagKind;
use std::fmt;
use thiserror::Error;

/// Conditions that abort the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unterminated doc comment starting at line {line}")]
    UnterminatedComment { line: usize },

    #[error("inheritance cycle: {}", chain.join(" -> "))]
    InheritanceCycle { chain: Vec<String> },

    #[error("unknown class: {0}")]
    UnknownClass(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A defect that was recovered from. Processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Tag with broken syntax, kept as plain text
    MalformedTag {
        tag: String,
        line: usize,
        reason: &'static str,
    },
    UnknownTag { tag: String, line: usize },
    Orphan {
        kind: TagKind,
        name: Option<String>,
    },
    DanglingExtends { class: String, parent: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedTag { tag, line, reason } => {
                write!(f, "Malformed @{} at comment line {}: {}", tag, line, reason)
            }
            Diagnostic::UnknownTag { tag, line } => {
                write!(f, "Unknown tag @{} at comment line {}", tag, line)
            }
            Diagnostic::Orphan { kind, name } => {
                write!(f, "Ignoring {}: {}", kind, name.as_deref().unwrap_or("?"))
            }
            Diagnostic::DanglingExtends { class, parent } => {
                write!(f, "Class {} extends unknown class {}", class, parent)
            }
        }
    }
}
