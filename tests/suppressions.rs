//! Integration tests for suppression files on disk.
//!
//! These tests drive the suppression store through real files: loading, merging,
//! matching during a run and regenerating the file afterwards.

use apicompat::{prelude::*, Result};
use std::{fs, sync::Arc};
use tempfile::TempDir;

const SUPPRESSION_FILE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Suppressions xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Suppression>
    <DiagnosticId>CP0002</DiagnosticId>
    <Target>M:Lib.Widget.Foo(System.Int32)</Target>
    <Left>v1</Left>
    <Right>v2</Right>
  </Suppression>
  <Suppression>
    <DiagnosticId>CP0001</DiagnosticId>
    <Target>T:Lib.Gone</Target>
  </Suppression>
</Suppressions>
"#;

#[test]
fn test_load_matches_and_reports_unused() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("CompatibilitySuppressions.xml");
    fs::write(&path, SUPPRESSION_FILE)?;

    let engine = SuppressionEngine::load_from_file(&path);
    assert_eq!(engine.len(), 2);

    // Case and surrounding whitespace of the observed difference do not matter.
    let observed = Suppression::new("cp0002")
        .with_target(" M:Lib.Widget.Foo(System.Int32) ")
        .with_left("V1")
        .with_right("v2");
    assert!(engine.is_suppressed(&observed));
    assert!(!engine.is_suppressed(&observed.clone().with_baseline(true)));

    let unmatched = engine.unmatched_suppressions();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].target.as_deref(), Some("T:Lib.Gone"));

    Ok(())
}

#[test]
fn test_store_survives_write_and_reload() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("input.xml");
    let output = dir.path().join("output.xml");
    fs::write(
        &input,
        r#"<?xml version="1.0" encoding="utf-8"?>
<Suppressions>
  <Suppression>
    <DiagnosticId>CP0002</DiagnosticId>
    <Target>M:Lib.Widget.Foo(System.Int32)</Target>
    <Left>lib/net6.0/Lib.dll</Left>
    <Right>lib/net8.0/Lib.dll</Right>
  </Suppression>
  <Suppression>
    <DiagnosticId>CP0009</DiagnosticId>
  </Suppression>
  <Suppression>
    <DiagnosticId>CP0001</DiagnosticId>
    <Target>T:Lib.Gone</Target>
    <Left>v1</Left>
    <Right>v2</Right>
    <IsBaselineSuppression>true</IsBaselineSuppression>
  </Suppression>
</Suppressions>
"#,
    )?;

    let original = SuppressionEngine::load_from_file(&input);
    assert_eq!(original.len(), 3);
    assert!(original.write_to_file(&output, true)?);

    let reloaded = SuppressionEngine::load_from_file(&output);
    assert_eq!(reloaded.suppressions(), original.suppressions());

    let baseline = reloaded
        .suppressions()
        .into_iter()
        .filter(|suppression| suppression.is_baseline_suppression)
        .collect::<Vec<_>>();
    assert_eq!(baseline.len(), 1);
    assert_eq!(baseline[0].target.as_deref(), Some("T:Lib.Gone"));

    let wildcard = Suppression::new("CP0009")
        .with_target("T:Lib.Widget")
        .with_left("v1")
        .with_right("v2");
    assert!(reloaded.is_suppressed(&wildcard));

    Ok(())
}

#[test]
fn test_missing_and_corrupt_files_yield_empty_store() -> Result<()> {
    let dir = TempDir::new()?;
    let corrupt = dir.path().join("corrupt.xml");
    fs::write(&corrupt, "<Suppressions><Suppression><Target>T:A</Target></Suppression>")?;

    let engine = SuppressionEngine::load_from_files([dir.path().join("missing.xml"), corrupt]);
    assert!(engine.is_empty());

    Ok(())
}

#[test]
fn test_merge_multiple_files() -> Result<()> {
    let dir = TempDir::new()?;
    let first = dir.path().join("first.xml");
    let second = dir.path().join("second.xml");
    fs::write(&first, SUPPRESSION_FILE)?;

    let writer = SuppressionEngine::new();
    writer.add(Suppression::new("CP0001").with_target("T:Lib.Gone"));
    writer.add(Suppression::new("CP0009").with_target("T:Lib.Widget"));
    assert!(writer.write_to_file(&second, true)?);

    let engine = SuppressionEngine::load_from_files([&first, &second]);
    assert_eq!(engine.len(), 3);

    Ok(())
}

#[test]
fn test_write_drops_unused_unless_preserved() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("out.xml");

    let engine = SuppressionEngine::new();
    engine.add(Suppression::new("CP0001").with_target("T:Lib.Unused"));
    engine.add(Suppression::new("CP0002").with_target("M:Lib.Widget.Bar"));
    engine.add_accepted(
        Suppression::new("CP0009")
            .with_target("T:Lib.Widget")
            .with_left("v1")
            .with_right("v2"),
    );
    assert!(engine.is_suppressed(&Suppression::new("CP0002").with_target("M:Lib.Widget.Bar")));

    assert!(engine.write_to_file(&path, false)?);
    let reloaded = SuppressionEngine::load_from_file(&path);
    let ids: Vec<String> = reloaded
        .suppressions()
        .into_iter()
        .map(|s| s.diagnostic_id)
        .collect();
    assert_eq!(ids, vec!["CP0002", "CP0009"]);

    assert!(engine.write_to_file(&path, true)?);
    assert_eq!(SuppressionEngine::load_from_file(&path).len(), 3);

    let written = fs::read_to_string(&path)?;
    assert!(written.find("CP0001") < written.find("CP0002"));
    assert!(!written.contains("IsBaselineSuppression"));

    Ok(())
}

#[test]
fn test_nothing_to_write_leaves_file_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("out.xml");
    fs::write(&path, "keep")?;

    let engine = SuppressionEngine::new();
    engine.add(Suppression::new("CP0001").with_target("T:Lib.Unused"));

    assert!(!engine.write_to_file(&path, false)?);
    assert_eq!(fs::read_to_string(&path)?, "keep");

    Ok(())
}

#[test]
fn test_concurrent_lookups_share_bookkeeping() {
    let engine = Arc::new(SuppressionEngine::new());
    engine.add(Suppression::new("CP0002"));

    std::thread::scope(|scope| {
        for i in 0..8 {
            let engine = engine.clone();
            scope.spawn(move || {
                let query = Suppression::new("CP0002").with_target(format!("M:Lib.Widget.M{i}"));
                assert!(engine.is_suppressed(&query));
            });
        }
    });

    assert!(engine.unmatched_suppressions().is_empty());
}
