use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ReleaseTag;

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Errors encountered while translating a version.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Errors encountered while resolving or packaging an archive.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Errors encountered when translating a semantic version into a release tag.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The input is not a valid semantic version.
    #[error("invalid version '{input}': {reason}")]
    InvalidVersion {
        /// The input originally provided.
        input: String,

        /// Why the input was rejected.
        reason: String,
    },

    /// The version is valid, but its prerelease has no release tag equivalent.
    #[error("version '{input}' has unsupported prerelease '{prerelease}'")]
    UnsupportedPrerelease {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The prerelease portion of the version.
        prerelease: String,

        /// The location of the prerelease in the input.
        #[label("prerelease")]
        span: SourceSpan,
    },
}

/// Errors encountered when resolving a source archive.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The archive source has nothing for the tag.
    #[error("no archive found for tag '{tag}'")]
    NotFound {
        /// The tag that was looked up.
        tag: ReleaseTag,
    },

    /// Reading a file from the archive source failed.
    #[error("read '{}'", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Walking a source directory failed.
    #[error("walk source directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Writing or reading the zip container failed.
    #[error("zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Return the span of `substr` inside `text`.
pub fn span(text: &str, substr: &str) -> (usize, usize) {
    text.find(substr)
        .map(|start| (start, substr.len()))
        .unwrap_or((0, text.len()))
}

/// Construct a new [`ParseError::InvalidVersion`].
///
/// ```ignore
/// error::invalid!(input, "missing leading 'v'");
/// ```
macro_rules! invalid {
    ($input:expr, $reason:expr) => {
        $crate::ParseError::InvalidVersion {
            input: $input.into(),
            reason: $reason.to_string(),
        }
    };
}
pub(crate) use invalid;

/// Shorthand for conversion into [`Error`] and returning.
macro_rules! fatal {
    ($err:expr) => {
        return Err($crate::error::Error::from($err))
    };
}
pub(crate) use fatal;
