#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod archive;
mod error;
mod source;
mod tag;
mod version;

pub use archive::*;
pub use error::{ArchiveError, Error, ParseError};
pub use source::*;
pub use tag::*;
pub use version::*;
