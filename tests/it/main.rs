//! Tests for the crate.

use impls::impls;
use pretty_assertions::assert_eq;
use simple_test_case::test_case;
use static_assertions::const_assert;

use gostdlib::*;

mod error;
mod tag;

#[test]
fn trait_impls() {
    const_assert!(impls!(StdVersion: (std::str::FromStr) & Ord & std::hash::Hash));
    const_assert!(impls!(StdVersion: TryFrom<&'static str> & TryFrom<String>));
    const_assert!(impls!(ReleaseTag: AsRef<str> & Into<String> & std::fmt::Display));
    const_assert!(impls!(FixtureSource: ArchiveSource & Send & Sync));
    const_assert!(impls!(DirectorySource: ArchiveSource & Send & Sync));
    const_assert!(impls!(Box<dyn ArchiveSource>: ArchiveSource));
    const_assert!(impls!(Error: (std::error::Error) & Send & Sync));
}

#[test_case("v1.12.5"; "complete")]
#[test_case("v1.13"; "incomplete")]
#[test_case("v1.13.0-beta.1"; "prerelease")]
#[test]
fn version_serde_roundtrip(input: &str) {
    let version = StdVersion::parse(input).expect("must parse");
    let serialized = serde_json::to_string(&version).expect("must serialize");
    let deserialized: StdVersion = serde_json::from_str(&serialized).expect("must deserialize");
    pretty_assertions::assert_eq!(version, deserialized);
    pretty_assertions::assert_eq!(deserialized.as_str(), input);
}

#[test]
fn tag_serializes_as_string() {
    let tag = tag_for_version("v1.13.0-beta.1").expect("must translate");
    let serialized = serde_json::to_string(&tag).expect("must serialize");
    assert_eq!(serialized, r#""go1.13beta1""#);
}
