use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use tracing::debug;

use crate::{ArchiveError, ArchiveSource, ReleaseTag, SourceTree};

/// The commit time reported for every tree served by [`FixtureSource`].
pub fn test_commit_time() -> DateTime<Utc> {
    // 2019-09-04T01:02:03Z
    DateTime::from_timestamp(1_567_558_923, 0).unwrap_or_default()
}

/// Declares the files of a fixture tree, embedded from `testdata/{tag}/`.
macro_rules! fixture_tree {
    ($tag:literal => [$($path:literal),+ $(,)?]) => {
        SourceTree::new(test_commit_time())
            $(.with_file(
                $path,
                include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/", $tag, "/", $path)).as_slice(),
            ))+
    };
}

/// A fixed, in-memory source of standard library trees for tests.
///
/// It knows exactly two releases:
/// - `go1.12.5`, whose top-level readme is `README.md`.
/// - `go1.3.2`, from before the readme was renamed, whose top-level readme is `README`.
///
/// Both trees contain `LICENSE`, `errors/errors.go` and `errors/errors_test.go`,
/// and report [`test_commit_time`] as their commit time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixtureSource;

impl ArchiveSource for FixtureSource {
    fn resolve(&self, tag: &ReleaseTag) -> Result<Option<SourceTree>, ArchiveError> {
        Ok(match tag.as_str() {
            "go1.12.5" => Some(fixture_tree!("go1.12.5" => [
                "LICENSE",
                "README.md",
                "errors/errors.go",
                "errors/errors_test.go",
            ])),
            "go1.3.2" => Some(fixture_tree!("go1.3.2" => [
                "LICENSE",
                "README",
                "errors/errors.go",
                "errors/errors_test.go",
            ])),
            _ => None,
        })
    }
}

/// Serves standard library trees from a local directory.
///
/// The directory holds one subdirectory per release tag, for example:
/// ```text
/// {root}/go1.12.5/LICENSE
/// {root}/go1.12.5/errors/errors.go
/// {root}/go1.3.2/README
/// ```
///
/// A local checkout has no commit metadata of its own,
/// so every tree reports the commit time provided at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
    commit_time: DateTime<Utc>,
}

impl DirectorySource {
    /// Serve trees from `root`, stamping each with `commit_time`.
    pub fn new(root: impl Into<PathBuf>, commit_time: DateTime<Utc>) -> Self {
        Self {
            root: root.into(),
            commit_time,
        }
    }

    /// The directory trees are served from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArchiveSource for DirectorySource {
    fn resolve(&self, tag: &ReleaseTag) -> Result<Option<SourceTree>, ArchiveError> {
        let base = self.root.join(tag.as_str());
        if !base.is_dir() {
            debug!(base = %base.display(), "no directory for tag");
            return Ok(None);
        }

        let mut tree = SourceTree::new(self.commit_time);
        let walker = WalkBuilder::new(&base)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let contents = std::fs::read(path).map_err(|source| ArchiveError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tree.insert(relative_name(&base, path), contents);
        }

        Ok(Some(tree))
    }
}

/// Render `path` relative to `base` with `/` separators.
fn relative_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
