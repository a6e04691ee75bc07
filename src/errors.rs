use std::fmt;
use thiserror::Error;

/// Which argument of a query failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperand {
    First,
    Second,
    Subject,
}

impl fmt::Display for QueryOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperand::First => write!(f, "first name"),
            QueryOperand::Second => write!(f, "second name"),
            QueryOperand::Subject => write!(f, "name"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("line {line_no}: missing ':' separator: {line:?}")]
    MalformedLine { line_no: usize, line: String },

    #[error("line {line_no}: parent node not found: {parent:?}")]
    ParentNotFound {
        line_no: usize,
        parent: String,
        line: String,
    },

    #[error("node not found for {operand}: {name:?}")]
    NodeNotFound { operand: QueryOperand, name: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal tree operation failed: {0}")]
    InternalError(String),
}

impl TreeError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors raised while turning declaration lines into a tree.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TreeError::MalformedLine { .. } | TreeError::ParentNotFound { .. }
        )
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
