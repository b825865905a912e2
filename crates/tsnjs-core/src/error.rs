//! Error taxonomy (spec.md §7). One enum per failing subsystem, a shared
//! `ErrorCode` trait for machine-readable codes, `#[from]` chaining up to
//! `TsnjsError` — the same layering the teacher uses for
//! `ContextError`/`StorageError`/`WorkspaceError`.

/// Machine-readable error code, surfaced in `--json` diagnostics.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{file}:{line}:{column}: {message}")]
    Syntax {
        file: String,
        message: String,
        line: u32,
        column: u32,
    },

    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension { extension: String },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "PARSE_ERROR",
            Self::UnsupportedExtension { .. } => "UNSUPPORTED_EXTENSION",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("no entry matches selector {selector:?}")]
    NotFound { selector: String },

    #[error("selector {selector:?} matches {count} entries: {candidates:?}")]
    Ambiguous {
        selector: String,
        count: usize,
        candidates: Vec<String>,
    },
}

impl ErrorCode for SelectorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "SELECTOR_NOT_FOUND",
            Self::Ambiguous { .. } => "SELECTOR_AMBIGUOUS",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("hash mismatch: expected {expected}, found {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("span mismatch: expected {expected:?}, found {actual:?}")]
    SpanMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("path mismatch: entry no longer found at {path_signature}")]
    PathMismatch { path_signature: String },

    #[error("structural mismatch: entry is {expected_kind} but replacement is {actual_kind}")]
    StructuralMismatch {
        expected_kind: String,
        actual_kind: String,
    },

    #[error("replacement does not parse: {0}")]
    InvalidReplacement(#[from] ParseError),

    #[error("replacement range [{start}, {end}) lies outside the entry's span")]
    RangeOutOfBounds { start: usize, end: usize },

    #[error("replacement snippet is empty")]
    EmptyReplacement,

    #[error("{0:?} is not a legal identifier in the target language")]
    InvalidIdentifier(String),
}

impl ErrorCode for GuardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::HashMismatch { .. } => "HASH_MISMATCH",
            Self::SpanMismatch { .. } => "SPAN_MISMATCH",
            Self::PathMismatch { .. } => "PATH_MISMATCH",
            Self::StructuralMismatch { .. } => "STRUCTURAL_MISMATCH",
            Self::InvalidReplacement(_) => "INVALID_REPLACEMENT",
            Self::RangeOutOfBounds { .. } => "RANGE_OUT_OF_BOUNDS",
            Self::EmptyReplacement => "EMPTY_REPLACEMENT",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("{path}: {message}")]
    FileNotFound { path: String, message: String },

    #[error("{path}: permission denied")]
    PermissionDenied { path: String },

    #[error("{path}: write failed: {message}")]
    WriteFailed { path: String, message: String },

    #[error("{path}: {message}")]
    Other { path: String, message: String },
}

impl ErrorCode for IoError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "IO_FILE_NOT_FOUND",
            Self::PermissionDenied { .. } => "IO_PERMISSION_DENIED",
            Self::WriteFailed { .. } => "IO_WRITE_FAILED",
            Self::Other { .. } => "IO_ERROR",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("options {a} and {b} are mutually exclusive")]
    MutuallyExclusive { a: String, b: String },

    #[error("missing required option: {0}")]
    MissingRequired(String),

    #[error("invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },
}

impl ErrorCode for ArgError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MutuallyExclusive { .. } => "ARG_MUTUALLY_EXCLUSIVE",
            Self::MissingRequired(_) => "ARG_MISSING_REQUIRED",
            Self::InvalidValue { .. } => "ARG_INVALID_VALUE",
        }
    }
}

/// Top-level error unifying every subsystem's failures, the shape every CLI
/// binary's `main()` returns.
#[derive(Debug, thiserror::Error)]
pub enum TsnjsError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Arg(#[from] ArgError),
}

impl ErrorCode for TsnjsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Selector(e) => e.error_code(),
            Self::Guard(e) => e.error_code(),
            Self::Io(e) => e.error_code(),
            Self::Arg(e) => e.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TsnjsError>;
