use std::{borrow::Cow, fmt::Write};

use bon::Builder;
use compact_str::{CompactString, ToCompactString, format_compact};
use derive_more::{Debug, Display};
use documented::Documented;
use nom::{
    IResult, Parser,
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, verify},
    sequence::preceded,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, ParseError, StdVersion, error};

/// Prerelease labels recognized by [`Translator::default`].
pub const DEFAULT_LABELS: [&str; 2] = ["beta", "rc"];

/// A release tag in the standard distribution's repository.
///
/// Tags take the form `go{MAJOR}.{MINOR}[.{PATCH}][{LABEL}{N}]`,
/// where the patch is omitted when it is zero and
/// a prerelease label is fused directly to its number, for example `go1.13beta1`.
///
/// Tags are only produced by [`Translator`]; there is no public constructor.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Display, Debug, Serialize, Documented)]
#[display("{}", self.0)]
pub struct ReleaseTag(CompactString);

impl ReleaseTag {
    /// View the tag as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The semantic version of this tag if it names a release.
    ///
    /// See [`release_version_for_tag`].
    pub fn release_version(&self) -> Option<String> {
        release_version_for_tag(self.as_str())
    }
}

impl AsRef<str> for ReleaseTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ReleaseTag> for String {
    fn from(value: ReleaseTag) -> Self {
        value.0.into_string()
    }
}

impl PartialSchema for ReleaseTag {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("go1.12.5"), json!("go1.13"), json!("go1.13beta1")])
            .min_length(Some(5))
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for ReleaseTag {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("ReleaseTag")
    }
}

/// Translates semantic versions into release tags.
///
/// ## Prereleases
///
/// Semantic versions separate a prerelease label from its number with a dot (`beta.1`),
/// while release tags fuse them (`beta1`). Only these prerelease shapes translate:
/// - A single identifier with no digits, which is copied verbatim:
///   `v1.13.0-prerelease` becomes `go1.13prerelease`.
/// - A recognized label followed by a numeric identifier:
///   `v1.13.0-beta.1` becomes `go1.13beta1`.
///
/// Everything else, including already-fused identifiers like `beta1`,
/// is rejected with [`ParseError::UnsupportedPrerelease`].
///
/// ## Configuration
///
/// The recognized labels default to [`DEFAULT_LABELS`].
/// The translator deserializes from a host application's configuration,
/// in which case a missing `labels` field also means the defaults:
/// ```
/// # use gostdlib::Translator;
/// let translator: Translator = serde_json::from_str(r#"{ "labels": ["alpha"] }"#).unwrap();
/// assert_eq!(translator.tag_for_version("v1.0.0-alpha.2").unwrap().as_str(), "go1.0alpha2");
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Builder, Serialize, Deserialize, Documented)]
#[serde(default)]
pub struct Translator {
    /// Prerelease labels that may be followed by a numeric identifier.
    #[builder(default = default_labels())]
    labels: Vec<CompactString>,
}

fn default_labels() -> Vec<CompactString> {
    DEFAULT_LABELS.iter().map(|l| l.to_compact_string()).collect()
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            labels: default_labels(),
        }
    }
}

impl Translator {
    /// Create a translator recognizing the provided prerelease labels.
    pub fn new(labels: impl IntoIterator<Item = impl Into<CompactString>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The recognized prerelease labels.
    pub fn labels(&self) -> &[CompactString] {
        &self.labels
    }

    /// Whether `label` is a recognized prerelease label.
    pub fn recognizes(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// Parse `version` and translate it to its release tag.
    pub fn tag_for_version(&self, version: impl AsRef<str>) -> Result<ReleaseTag, Error> {
        let version = StdVersion::parse(version)?;
        self.tag_for(&version)
    }

    /// Translate an already parsed version to its release tag.
    pub fn tag_for(&self, version: &StdVersion) -> Result<ReleaseTag, Error> {
        let mut rendered = format_compact!("go{}.{}", version.major(), version.minor());
        if version.patch() != 0 {
            // Writing to a `CompactString` can't fail.
            let _ = write!(rendered, ".{}", version.patch());
        }
        if version.is_prerelease() {
            rendered.push_str(&self.prerelease_suffix(version)?);
        }

        debug!(%version, tag = %rendered, "translated version to release tag");
        Ok(ReleaseTag(rendered))
    }

    fn prerelease_suffix(&self, version: &StdVersion) -> Result<CompactString, Error> {
        let prerelease = version.prerelease();
        let identifiers = prerelease.split('.').collect::<Vec<_>>();
        match identifiers.as_slice() {
            [word] if !word.bytes().any(|b| b.is_ascii_digit()) => Ok(word.to_compact_string()),
            [label, number] if self.recognizes(label) && is_numeric(number) => {
                Ok(format_compact!("{label}{number}"))
            }
            _ => {
                let input = version.as_str();
                let (offset, len) = error::span(input, prerelease);
                error::fatal!(ParseError::UnsupportedPrerelease {
                    input: input.to_string(),
                    prerelease: prerelease.to_string(),
                    span: (offset, len).into(),
                })
            }
        }
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// Translate `version` to its release tag using the default [`Translator`].
///
/// ```
/// assert_eq!(gostdlib::tag_for_version("v1.12.5").unwrap().as_str(), "go1.12.5");
/// assert_eq!(gostdlib::tag_for_version("v1.13").unwrap().as_str(), "go1.13");
/// assert_eq!(gostdlib::tag_for_version("v1.13.0-beta.1").unwrap().as_str(), "go1.13beta1");
/// assert!(gostdlib::tag_for_version("v1.13.0-beta1").is_err());
/// ```
pub fn tag_for_version(version: impl AsRef<str>) -> Result<ReleaseTag, Error> {
    Translator::default().tag_for_version(version)
}

/// Translate a release tag back to its semantic version.
///
/// This is a partial inverse of [`tag_for_version`]: only tags naming a release
/// (`go{MAJOR}.{MINOR}[.{PATCH}]`) translate, with the patch defaulting to `0`.
/// Any other input, including prerelease tags like `go1.9beta2`, yields `None`;
/// callers probe arbitrary tags and treat `None` as "no match".
///
/// ```
/// assert_eq!(gostdlib::release_version_for_tag("go1.12").as_deref(), Some("v1.12.0"));
/// assert_eq!(gostdlib::release_version_for_tag("go1.9beta2"), None);
/// ```
pub fn release_version_for_tag(tag: &str) -> Option<String> {
    /// `nom` parser for a release tag's numeric components.
    fn parse_release(s: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
        let (s, _) = nom::bytes::complete::tag("go").parse(s)?;
        let (s, major) = component.parse(s)?;
        let (s, _) = char('.').parse(s)?;
        let (s, minor) = component.parse(s)?;
        let (s, patch) = opt(preceded(char('.'), component)).parse(s)?;
        Ok((s, (major, minor, patch)))
    }

    /// Digits without a leading zero, unless the component is exactly `0`.
    fn component(s: &str) -> IResult<&str, &str> {
        verify(digit1, |d: &str| d == "0" || !d.starts_with('0')).parse(s)
    }

    let (_, (major, minor, patch)) = all_consuming(parse_release).parse(tag).ok()?;
    let major = major.parse::<u64>().ok()?;
    let minor = minor.parse::<u64>().ok()?;
    let patch = match patch {
        Some(patch) => patch.parse::<u64>().ok()?,
        None => 0,
    };
    Some(format!("v{major}.{minor}.{patch}"))
}
