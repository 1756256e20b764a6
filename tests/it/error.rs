use color_eyre::{Result, eyre::Context};
use gostdlib::{FixtureSource, tag_for_version, zip};
use pretty_assertions::assert_eq;

#[test]
fn error_wrappable_context() -> Result<()> {
    let tag = tag_for_version("v1.12.5").context("can wrap")?;
    assert_eq!(tag.as_str(), "go1.12.5");

    let (archive, _) = zip("v1.12.5", &FixtureSource).context("can wrap")?;
    assert!(!archive.is_empty());

    Ok(())
}

#[test]
fn error_wrappable_withcontext() -> Result<()> {
    let tag = tag_for_version("v1.13").with_context(|| "can wrap")?;
    assert_eq!(tag.as_str(), "go1.13");

    let err = tag_for_version("v1.x").with_context(|| "can wrap").unwrap_err();
    assert!(format!("{err:?}").contains("v1.x"));

    Ok(())
}

#[test]
fn messages_name_the_input() {
    let err = tag_for_version("v1.13.0-whatevs99").unwrap_err();
    assert_eq!(
        err.to_string(),
        "version 'v1.13.0-whatevs99' has unsupported prerelease 'whatevs99'"
    );

    let err = zip("v1.99.0", &FixtureSource).unwrap_err();
    assert_eq!(err.to_string(), "no archive found for tag 'go1.99'");
}
