use std::{borrow::Cow, str::FromStr};

use compact_str::{CompactString, ToCompactString, format_compact};
use derivative::Derivative;
use derive_more::{Debug, Display};
use documented::Documented;
use duplicate::duplicate;
use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, error};

/// A semantic version naming a release of the standard library.
///
/// Versions take the form `vMAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
/// The leading `v` is required.
///
/// As a special case, the incomplete forms `vMAJOR` and `vMAJOR.MINOR` are accepted
/// and canonicalized by filling missing components with `0`,
/// so `v1.13` is the same version as `v1.13.0`.
/// Incomplete forms may not carry a prerelease or build suffix: `v1.0-` and `v1.0-rc.1` are invalid.
///
/// Build metadata is accepted but is not part of the canonical version.
#[derive(Derivative, Documented, Display, Clone, Debug)]
#[derivative(Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display("{}", self.input)]
pub struct StdVersion {
    /// The parsed version, with build metadata removed.
    pub(crate) parsed: semver::Version,

    /// The original input.
    #[derivative(PartialEq = "ignore", Ord = "ignore", Hash = "ignore")]
    pub(crate) input: CompactString,
}

impl StdVersion {
    /// Parse the input string as a version.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref();
        let Some(stripped) = input.strip_prefix('v') else {
            error::fatal!(error::invalid!(input, "missing leading 'v'"));
        };

        // `semver` requires all three components, so fill in the shorthand forms ourselves.
        let parsed = if let Some((_, major, minor)) =
            regex_captures!(r"^(0|[1-9]\d*)(?:\.(0|[1-9]\d*))?$", stripped)
        {
            let major = parse_component(input, major)?;
            let minor = if minor.is_empty() {
                0
            } else {
                parse_component(input, minor)?
            };
            semver::Version::new(major, minor, 0)
        } else {
            let mut parsed = semver::Version::parse(stripped)
                .map_err(|err| error::invalid!(input, err))?;
            parsed.build = semver::BuildMetadata::EMPTY;
            parsed
        };

        Ok(Self {
            parsed,
            input: input.to_compact_string(),
        })
    }

    /// View the original input as a string.
    pub fn as_str(&self) -> &str {
        self.input.as_str()
    }

    /// The canonical rendering: `vMAJOR.MINOR.PATCH[-PRERELEASE]`.
    pub fn canonical(&self) -> CompactString {
        let v = &self.parsed;
        if v.pre.is_empty() {
            format_compact!("v{}.{}.{}", v.major, v.minor, v.patch)
        } else {
            format_compact!("v{}.{}.{}-{}", v.major, v.minor, v.patch, v.pre)
        }
    }

    /// The major version component.
    pub fn major(&self) -> u64 {
        self.parsed.major
    }

    /// The minor version component.
    pub fn minor(&self) -> u64 {
        self.parsed.minor
    }

    /// The patch version component; `0` if the input omitted it.
    pub fn patch(&self) -> u64 {
        self.parsed.patch
    }

    /// The prerelease, without its leading `-`. Empty for releases.
    pub fn prerelease(&self) -> &str {
        self.parsed.pre.as_str()
    }

    /// Whether this version carries a prerelease.
    pub fn is_prerelease(&self) -> bool {
        !self.parsed.pre.is_empty()
    }

    /// The parsed `semver` representation.
    pub fn as_semver(&self) -> &semver::Version {
        &self.parsed
    }
}

fn parse_component(input: &str, digits: &str) -> Result<u64, Error> {
    digits
        .parse::<u64>()
        .map_err(|err| error::invalid!(input, format!("component '{digits}': {err}")).into())
}

impl FromStr for StdVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

duplicate! {
    [
        ty;
        [ &str ];
        [ &String ];
        [ String ];
    ]
    impl TryFrom<ty> for StdVersion {
        type Error = Error;
        fn try_from(s: ty) -> Result<Self, Self::Error> {
            Self::parse(s)
        }
    }
}

impl AsRef<str> for StdVersion {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for StdVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StdVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for StdVersion {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("v1.12.5"), json!("v1.13"), json!("v1.13.0-beta.1")])
            .min_length(Some(2))
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for StdVersion {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("StdVersion")
    }
}
