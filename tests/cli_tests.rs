//! Command-line tests
//!
//! Runs the binary against small tables in temporary directories.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TABLE: &str = "\
chrom,pos,ref,alt,lab1,lab2
1,100,A,G,Benign,Likely benign
1,200,GA,G,Pathogenic,Benign
2,300,GAGA,AGCG,,VUS
2,400,A,AG,foo,VUS
";

fn write_table(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("consensus-reporter").unwrap()
}

#[test]
fn test_report_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let input = write_table(dir.path(), "variants.csv", TABLE);

    cmd()
        .arg("report")
        .arg(&input)
        .args(["--labs", "lab1,lab2", "--prefix", "test_", "--month-year", "october_2026"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Opposite classifications"));

    for name in [
        "test_opposites_report_october_2026.txt",
        "test_public.csv",
        "test_delins.csv",
        "test_types.txt",
        "test_counts.html",
        "test_log.txt",
    ] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }

    let public = fs::read_to_string(dir.path().join("test_public.csv")).unwrap();
    assert!(public.starts_with("chrom,pos,ref,alt,classification,status,lab_count"));
    assert!(!public.contains("1,200,"));

    let opposites =
        fs::read_to_string(dir.path().join("test_opposites_report_october_2026.txt")).unwrap();
    assert!(opposites.contains("Pathogenic"));

    let log = fs::read_to_string(dir.path().join("test_log.txt")).unwrap();
    assert!(log.contains("foo"));
}

#[test]
fn test_report_json_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_table(dir.path(), "variants.csv", TABLE);

    let output = cmd()
        .args(["--format", "json", "report"])
        .arg(&input)
        .args(["--labs", "lab1,lab2"])
        .arg("--output-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows_processed"], 4);
    assert_eq!(json["decisions"]["opposite"], 1);
    assert_eq!(json["decisions"]["consensus"], 1);
    assert_eq!(json["types"]["counts"]["lab2"]["delins"], 1);
}

#[test]
fn test_report_missing_lab_column() {
    let dir = TempDir::new().unwrap();
    let input = write_table(dir.path(), "variants.csv", TABLE);

    cmd()
        .arg("report")
        .arg(&input)
        .args(["--labs", "lab1,lab3"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("lab3"));
}

#[test]
fn test_report_abort_on_bad_allele() {
    let dir = TempDir::new().unwrap();
    let input = write_table(
        dir.path(),
        "variants.csv",
        "ref,alt,lab1\nA,G,Benign\nA,XYZ,Benign\n",
    );

    cmd()
        .arg("report")
        .arg(&input)
        .args(["--labs", "lab1", "--on-error", "abort"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 3"));
}

#[test]
fn test_types_tsv_from_tab_separated_input() {
    let dir = TempDir::new().unwrap();
    let input = write_table(dir.path(), "variants.tsv", &TABLE.replace(',', "\t"));

    cmd()
        .args(["types", "--format", "tsv"])
        .arg(&input)
        .args(["--labs", "lab1,lab2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab\tsnp\tins\tdel\tdelins"))
        .stdout(predicate::str::contains("lab1\t1\t1\t1\t0"))
        .stdout(predicate::str::contains("lab2\t1\t1\t1\t1"));
}

#[test]
fn test_normalize() {
    cmd()
        .args(["normalize", "(Likely) benign", "Pathogenic", "nonsense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Likely) benign: LB (tier LB)"))
        .stdout(predicate::str::contains("Pathogenic: P (tier LP)"))
        .stdout(predicate::str::contains("nonsense: no call"));
}
