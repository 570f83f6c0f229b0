// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Source(SourceError),
    Grid(GridError),
}

/// Coordinates passed to the flip orchestrator that do not address a tile.
///
/// These are caller bugs, not user-driven conditions, so they are reported
/// instead of being clamped or ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Row index is past the last row of the presented layout.
    RowOutOfRange { row: usize, rows: usize },

    /// Piece index is past the last slot of a row.
    PieceOutOfRange { piece: usize, columns: usize },
}

/// Failures reported by the data source or the image preloader.
///
/// Any of these leaves the gallery in its "initialization failed" state:
/// no rows, no interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The portfolio payload could not be retrieved.
    Fetch(String),

    /// The payload was retrieved but is not a portfolio document.
    Decode(String),

    /// A primary image failed to preload.
    Preload { image: String, reason: String },
}

impl SourceError {
    /// Returns a short, stable label for status lines and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Fetch(_) => "fetch",
            SourceError::Decode(_) => "decode",
            SourceError::Preload { .. } => "preload",
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::RowOutOfRange { row, rows } => {
                write!(f, "row {} out of range ({} rows)", row, rows)
            }
            GridError::PieceOutOfRange { piece, columns } => {
                write!(f, "piece {} out of range ({} per row)", piece, columns)
            }
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            SourceError::Decode(msg) => write!(f, "Invalid portfolio data: {}", msg),
            SourceError::Preload { image, reason } => {
                write!(f, "Failed to preload {}: {}", image, reason)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Source(e) => write!(f, "Source Error: {}", e),
            Error::Grid(e) => write!(f, "Grid Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Error::Grid(err)
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Source(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Source(SourceError::Decode(err.to_string()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Source(SourceError::Fetch(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn grid_error_formats_coordinates() {
        let err: Error = GridError::RowOutOfRange { row: 4, rows: 2 }.into();
        assert_eq!(format!("{}", err), "Grid Error: row 4 out of range (2 rows)");

        let err = GridError::PieceOutOfRange {
            piece: 3,
            columns: 3,
        };
        assert_eq!(format!("{}", err), "piece 3 out of range (3 per row)");
    }

    #[test]
    fn json_error_becomes_decode_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Source(SourceError::Decode(_))));
    }

    #[test]
    fn source_error_kinds_are_stable() {
        assert_eq!(SourceError::Fetch("x".into()).kind(), "fetch");
        assert_eq!(SourceError::Decode("x".into()).kind(), "decode");
        assert_eq!(
            SourceError::Preload {
                image: "a.jpg".into(),
                reason: "404".into()
            }
            .kind(),
            "preload"
        );
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }
}
