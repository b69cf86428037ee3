use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    /// A wire-shaped mutation request did not match the expected shape.
    /// Everything else malformed (empty insert value, out-of-range delete
    /// index, unknown comparison operator) degrades to a silent no-op.
    MalformedRequest(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedRequest(err) => write!(f, "Malformed request: {}", err),
        }
    }
}

impl std::error::Error for Error {}
