// `summary` and `groups` modes of the CLI, run against files on disk

use neighborhood_demographics::{BucketValue, Demographics};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn write_fixtures(dir: &Path) {
    let mut doc = Demographics::seed(["Japantown", "SoFA", "Alviso"]);

    let japantown = doc.get_mut("Japantown").unwrap();
    japantown.age.set("Under 5", BucketValue::Count(80.0));
    japantown.age.set("Over 65", BucketValue::Count(20.0));
    japantown.income.set("$50,000 to $74,999", BucketValue::Count(10.0));

    doc.get_mut("SoFA")
        .unwrap()
        .age
        .set("Over 65", BucketValue::Count(100.0));

    doc.write(&dir.join("demographics.json")).unwrap();
    fs::write(dir.join("groups.json"), r#"{"Downtown": ["Japantown", "SoFA", "SoFA"]}"#).unwrap();
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_neighborhood-demographics"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_summary_for_named_neighborhood() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &["summary", "Japantown"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Japantown\n"));
    assert!(stdout.contains("Median Income:     $50,000 to $74,999"));
    assert!(stdout.contains("% Over Age 65:     20.0%"));
    assert!(stdout.contains("Total Population:  100\n"));
}

#[test]
fn test_summary_for_group_counts_members_once() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &["summary", "Downtown"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Downtown\n"));
    assert!(stdout.contains("Total Population:  200\n"));
    assert!(stdout.contains("% Over Age 65:     60.0%"));
}

#[test]
fn test_summary_unknown_name_warns() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &["summary", "Nowhere", "Alviso"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No information on 'Nowhere'"));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Alviso\n"));
}

#[test]
fn test_summary_without_names_lists_every_entity() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &["summary"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let headers: Vec<&str> = stdout.lines().filter(|l| !l.starts_with(' ') && !l.is_empty()).collect();
    assert_eq!(headers, vec!["Japantown", "SoFA", "Alviso"]);
}

#[test]
fn test_summary_without_demographics_fails() {
    let dir = tempfile::tempdir().unwrap();

    let out = run(dir.path(), &["summary"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("demographics.json not found"));
}

#[test]
fn test_groups_view() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &["groups"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Downtown: Japantown, SoFA\nAlviso\n"
    );
}
