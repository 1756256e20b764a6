//! Packaging the standard library's source tree at a version into a zip archive.
//!
//! The tree itself comes from an [`ArchiveSource`], which is keyed by [`ReleaseTag`].
//! Callers choose the source explicitly, so tests can substitute
//! [`FixtureSource`](crate::FixtureSource) for whatever serves real releases.

use std::{
    collections::BTreeMap,
    fmt,
    io::{Cursor, Read, Write},
};

use chrono::{DateTime, Datelike, Timelike, Utc};
use derive_new::new;
use tracing::{debug, warn};
use zip::{ZipArchive, ZipWriter, result::ZipError, write::SimpleFileOptions};

use crate::{ArchiveError, Error, ReleaseTag, StdVersion, Translator};

/// Provides the source tree of the standard library for a release tag.
pub trait ArchiveSource {
    /// Resolve the tree for `tag`.
    ///
    /// Returns `Ok(None)` if the source has no such tag.
    fn resolve(&self, tag: &ReleaseTag) -> Result<Option<SourceTree>, ArchiveError>;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &T {
    fn resolve(&self, tag: &ReleaseTag) -> Result<Option<SourceTree>, ArchiveError> {
        (**self).resolve(tag)
    }
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for Box<T> {
    fn resolve(&self, tag: &ReleaseTag) -> Result<Option<SourceTree>, ArchiveError> {
        (**self).resolve(tag)
    }
}

/// A snapshot of the standard library's source at a single commit.
///
/// Paths are relative to the root of the tree and use `/` as the separator.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct SourceTree {
    /// When the snapshot was committed.
    commit_time: DateTime<Utc>,

    #[new(default)]
    files: BTreeMap<String, Vec<u8>>,
}

impl SourceTree {
    /// Add a file to the tree, replacing any existing file at `path`.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Add a file to the tree, returning the tree.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// When the snapshot was committed.
    pub fn commit_time(&self) -> DateTime<Utc> {
        self.commit_time
    }

    /// Iterate the files in the tree in path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_slice()))
    }

    /// The number of files in the tree.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the tree has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// An in-memory zip archive of the standard library's source.
///
/// Every entry is named `std@{version}/{path}`.
pub struct Archive {
    reader: ZipArchive<Cursor<Vec<u8>>>,
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl Archive {
    /// Package `tree` into an archive, prefixing every entry with `prefix`.
    fn pack(prefix: &str, tree: &SourceTree) -> Result<Self, ArchiveError> {
        let modified = zip_time(tree.commit_time());
        if modified.is_none() {
            warn!(commit_time = %tree.commit_time(), "commit time not representable in zip");
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, contents) in tree.files() {
            let options = match modified {
                Some(modified) => SimpleFileOptions::default().last_modified_time(modified),
                None => SimpleFileOptions::default(),
            };
            writer.start_file(format!("{prefix}{path}"), options)?;
            writer.write_all(contents).map_err(ZipError::from)?;
        }

        let buffer = writer.finish()?;
        let reader = ZipArchive::new(buffer)?;
        Ok(Self { reader })
    }

    /// The number of entries in the archive.
    pub fn len(&self) -> usize {
        self.reader.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.reader.len() == 0
    }

    /// The names of the entries, in the order they were written.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.reader.file_names()
    }

    /// Read the contents of the entry named `name`.
    pub fn read(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut entry = self.reader.by_name(name)?;
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).map_err(ZipError::from)?;
        Ok(contents)
    }

    /// The encoded zip archive.
    pub fn into_bytes(self) -> Vec<u8> {
        self.reader.into_inner().into_inner()
    }
}

/// Convert to the zip format's timestamp, which only covers 1980 through 2107.
fn zip_time(time: DateTime<Utc>) -> Option<zip::DateTime> {
    let year = u16::try_from(time.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .ok()
}

/// Package the standard library source for `version`,
/// returning the archive and the commit time of the source.
///
/// The version is translated to a release tag with the default [`Translator`],
/// which is then resolved by `source`.
///
/// ```
/// # use gostdlib::{FixtureSource, zip};
/// let (archive, commit_time) = zip("v1.12.5", &FixtureSource).unwrap();
/// assert!(archive.file_names().all(|name| name.starts_with("std@v1.12.5/")));
/// assert_eq!(commit_time, gostdlib::test_commit_time());
/// ```
pub fn zip(
    version: impl AsRef<str>,
    source: &impl ArchiveSource,
) -> Result<(Archive, DateTime<Utc>), Error> {
    zip_with(&Translator::default(), version, source)
}

/// Like [`zip`], but translates the version with the provided [`Translator`].
#[tracing::instrument(skip_all, fields(version = version.as_ref()))]
pub fn zip_with(
    translator: &Translator,
    version: impl AsRef<str>,
    source: &impl ArchiveSource,
) -> Result<(Archive, DateTime<Utc>), Error> {
    let version = StdVersion::parse(version)?;
    let tag = translator.tag_for(&version)?;

    let Some(tree) = source.resolve(&tag)? else {
        return Err(ArchiveError::NotFound { tag }.into());
    };

    let archive = Archive::pack(&format!("std@{version}/"), &tree)?;
    debug!(%tag, entries = archive.len(), "packaged source archive");
    Ok((archive, tree.commit_time()))
}
