use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simple_test_case::test_case;

use gostdlib::*;

#[test_case("v1.12.5", "go1.12.5"; "std_version")]
#[test_case("v1.13", "go1.13"; "incomplete_canonical_version")]
#[test_case("v1.13.0-beta.1", "go1.13beta1"; "beta_prerelease")]
#[test_case("v1.13.0-rc.2", "go1.13rc2"; "rc_prerelease")]
#[test_case("v1.13.0-prerelease", "go1.13prerelease"; "digitless_prerelease")]
#[test_case("v1.13.0", "go1.13"; "zero_patch")]
#[test_case("v1.12.5-beta.10", "go1.12.5beta10"; "patch_and_prerelease")]
#[test_case("v1", "go1.0"; "major_only")]
#[test_case("v2.0.0", "go2.0"; "major_two")]
#[test]
fn tag_for_version_translates(version: &str, expected: &str) {
    let tag = tag_for_version(version).expect("must translate");
    pretty_assertions::assert_eq!(tag.as_str(), expected);
}

#[test_case("v1.x"; "bad_std_semver")]
#[test_case("v1.0-"; "more_bad_std_semver")]
#[test_case("1.13.0"; "missing_v")]
#[test_case("go1.13"; "tag_as_version")]
#[test_case(""; "empty")]
#[test]
fn tag_for_version_invalid(version: &str) {
    assert_matches!(
        tag_for_version(version),
        Err(Error::Parse(ParseError::InvalidVersion { .. }))
    );
}

#[test_case("v1.13.0-beta1"; "bad_prerelease")]
#[test_case("v1.13.0-whatevs99"; "another_bad_prerelease")]
#[test_case("v1.13.0-whatevs.99"; "unrecognized_label")]
#[test_case("v1.13.0-alpha.1"; "alpha_not_recognized_by_default")]
#[test]
fn tag_for_version_unsupported_prerelease(version: &str) {
    assert_matches!(
        tag_for_version(version),
        Err(Error::Parse(ParseError::UnsupportedPrerelease { .. }))
    );
}

#[test_case("", None; "empty")]
#[test_case("go1.9beta2", None; "prerelease")]
#[test_case("go1.12", Some("v1.12.0"); "no_patch")]
#[test_case("go1.9.7", Some("v1.9.7"); "patch")]
#[test_case("go2.0", Some("v2.0.0"); "major_two")]
#[test_case("weekly.2012-03-27", None; "weekly")]
#[test_case("release.r60", None; "release_branch")]
#[test]
fn release_version_for_tag_translates(tag: &str, expected: Option<&str>) {
    pretty_assertions::assert_eq!(release_version_for_tag(tag).as_deref(), expected);
}

#[test]
fn release_tag_inverts() {
    let tag = tag_for_version("v1.12.5").expect("must translate");
    assert_eq!(tag.release_version().as_deref(), Some("v1.12.5"));

    let tag = tag_for_version("v1.13.0-beta.1").expect("must translate");
    assert_eq!(tag.release_version(), None);
}

#[test]
fn custom_labels() {
    let translator = Translator::new(["alpha"]);
    let tag = translator
        .tag_for_version("v1.0.0-alpha.2")
        .expect("must translate");
    assert_eq!(tag.as_str(), "go1.0alpha2");

    assert_matches!(
        translator.tag_for_version("v1.0.0-beta.1"),
        Err(Error::Parse(ParseError::UnsupportedPrerelease { .. }))
    );
}

#[test]
fn labels_from_config() {
    let translator: Translator =
        serde_json::from_str(r#"{ "labels": ["beta", "rc", "alpha"] }"#).expect("must parse");
    assert!(translator.recognizes("alpha"));
    assert!(translator.recognizes("rc"));

    let translator: Translator = serde_json::from_str("{}").expect("must parse");
    assert_eq!(translator, Translator::default());
}

#[test]
fn parsed_version_translates() {
    let version = StdVersion::parse("v1.13").expect("must parse");
    let tag = Translator::default().tag_for(&version).expect("must translate");
    assert_eq!(tag.as_str(), "go1.13");
}

proptest! {
    #[test]
    fn release_roundtrip(major in 0u64..100, minor in 0u64..100, patch in 0u64..100) {
        let version = format!("v{major}.{minor}.{patch}");
        let tag = tag_for_version(&version).expect("must translate");
        prop_assert_eq!(release_version_for_tag(tag.as_str()), Some(version));
    }

    #[test]
    fn incomplete_roundtrip(major in 0u64..100, minor in 0u64..100) {
        let tag = tag_for_version(format!("v{major}.{minor}")).expect("must translate");
        prop_assert_eq!(release_version_for_tag(tag.as_str()), Some(format!("v{major}.{minor}.0")));
    }

    #[test]
    fn release_version_never_panics(tag in "\\PC*") {
        let _ = release_version_for_tag(&tag);
    }
}
