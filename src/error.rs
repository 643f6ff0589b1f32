use thiserror::Error;

/// Rejected element path text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path must start with '/' or '//': {0}")]
    Relative(String),

    #[error("empty step at byte {0}")]
    EmptyStep(usize),

    #[error("invalid name test in step '{0}'")]
    InvalidName(String),

    #[error("unterminated predicate in step '{0}'")]
    UnterminatedPredicate(String),

    #[error("unsupported predicate '[{0}]'")]
    UnsupportedPredicate(String),

    #[error("positions are 1-based, got [0] in step '{0}'")]
    ZeroPosition(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("no element matches the path")]
    NotFound,

    #[error("element has no text")]
    NoText,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Received non-200 response ({status}) from URL: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("expected {expected} company names, collected {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("{per_page} results per page configured but the grid has {cells} cells")]
    LayoutMismatch { per_page: usize, cells: usize },

    #[error("grid layout has no cells")]
    EmptyLayout,

    #[error("{page_count} pages of {per_page} results overflows the offset range")]
    Overflow { page_count: usize, per_page: usize },

    #[error("invalid name path '{path}': {source}")]
    Path {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
