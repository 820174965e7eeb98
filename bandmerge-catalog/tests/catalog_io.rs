use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use approx::assert_relative_eq;
use bandmerge_catalog::io::{
    parse_catalog, read_catalog, write_catalog_text, write_merged_text, write_to_path, LoadOptions,
};
use bandmerge_core::{Band, BandMergeError, Positioned};
use bandmerge_xmatch::CrossMatcher;
use tempfile::TempDir;

const HEADER: &str = "epoch 2020\nepoch 2021\nepoch 2022\n";
const RADIUS: f64 = 0.001;

fn row(h: (f64, f64), j: (f64, f64), k: (f64, f64)) -> String {
    format!("{} {} {} {} {} {}\n", h.0, h.1, j.0, j.1, k.0, k.1)
}

fn k_row(ra: f64, dec: f64) -> String {
    row((ra, dec), (ra, dec), (ra, dec))
}

fn write_file(dir: &TempDir, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from(HEADER);
    for r in rows {
        content.push_str(r);
    }
    fs::write(&path, content).unwrap();
    path
}

fn data_lines(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split_whitespace().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_difference_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let base = write_file(
        &dir,
        "base.dat",
        &[k_row(10.0, 20.0), k_row(10.1, 20.1), k_row(10.2, 20.2)],
    );
    let filter = write_file(&dir, "filter.dat", &[k_row(10.1, 20.1002)]);

    let options = LoadOptions::default();
    let base = read_catalog(&base, &options).unwrap();
    let filter = read_catalog(&filter, &options).unwrap();
    assert_eq!(base.label(), "base.dat");

    let matcher = CrossMatcher::new(RADIUS).unwrap();
    let kept = matcher.difference(&base, &[filter]);

    let out = dir.path().join("diff.dat");
    write_to_path(&out, |w| write_catalog_text(w, &kept)).unwrap();

    let lines = data_lines(&out);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0][0], "0");
    assert_eq!(lines[1][0], "2");
    assert_eq!(lines[0].len(), 7);

    // Written values re-read to the same coordinates.
    let ra: f64 = lines[1][5].parse().unwrap();
    let dec: f64 = lines[1][6].parse().unwrap();
    assert_relative_eq!(ra, 10.2);
    assert_relative_eq!(dec, 20.2);
}

#[test]
fn test_union_file_output_tags_sources() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "a.dat", &[k_row(1.0, 1.0), k_row(2.0, 2.0)]);
    let second = write_file(&dir, "b.dat", &[k_row(2.0, 2.0005), k_row(3.0, 3.0)]);

    let options = LoadOptions::default();
    let catalogs = vec![
        read_catalog(&first, &options).unwrap(),
        read_catalog(&second, &options).unwrap(),
    ];
    let merged = CrossMatcher::new(RADIUS).unwrap().union(&catalogs).unwrap();

    let out = dir.path().join("union.dat");
    write_to_path(&out, |w| write_merged_text(w, &merged)).unwrap();

    let ids: Vec<(String, String)> = data_lines(&out)
        .into_iter()
        .map(|l| (l[0].clone(), l[1].clone()))
        .collect();
    let expected: Vec<(String, String)> = [("0", "0"), ("0", "1"), ("1", "1")]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_sentinel_survives_write_and_reload() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "partial.dat",
        &[row((-9999.0, -9999.0), (5.0, 6.0), (5.1, 6.1))],
    );
    let catalog = read_catalog(&input, &LoadOptions::default()).unwrap();
    assert!(!catalog[0].is_measured(Band::H));

    let out = dir.path().join("copy.dat");
    write_to_path(&out, |w| write_catalog_text(w, &catalog)).unwrap();

    // Drop the idx column and re-read with no header.
    let body: String = fs::read_to_string(&out)
        .unwrap()
        .lines()
        .map(|l| l.split_once(' ').map(|(_, rest)| rest).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");
    let options = LoadOptions {
        header_lines: 0,
        ..LoadOptions::default()
    };
    let reloaded = parse_catalog("copy", &body, &options).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(!reloaded[0].is_measured(Band::H));
    let k = reloaded[0].position(Band::K).unwrap();
    assert_relative_eq!(k.ra, 5.1);
    assert_relative_eq!(k.dec, 6.1);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_catalog(dir.path().join("absent.dat"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, BandMergeError::Io(_)));
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.dat", &[k_row(1.0, 1.0), "1.0 2.0 oops\n".into()]);
    let err = read_catalog(&path, &LoadOptions::default()).unwrap_err();
    match err {
        BandMergeError::Parse {
            source_name, line, ..
        } => {
            assert_eq!(source_name, "broken.dat");
            assert_eq!(line, 5);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_bmtool_diff_end_to_end() {
    let dir = TempDir::new().unwrap();
    let base = write_file(&dir, "base.dat", &[k_row(10.0, 20.0), k_row(10.1, 20.1)]);
    let filter = write_file(&dir, "filter.dat", &[k_row(10.0, 20.0001)]);
    let out = dir.path().join("out.dat");

    let status = Command::new(env!("CARGO_BIN_EXE_bmtool"))
        .arg("--quiet")
        .args(["--radius", "0.001"])
        .arg("diff")
        .arg(&base)
        .arg("--filters")
        .arg(&filter)
        .arg("--output")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let lines = data_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0][0], "1");
}

#[test]
fn test_bmtool_rejects_bad_radius() {
    let dir = TempDir::new().unwrap();
    let base = write_file(&dir, "base.dat", &[k_row(1.0, 1.0)]);

    let output = Command::new(env!("CARGO_BIN_EXE_bmtool"))
        .args(["--radius", "0"])
        .arg("match")
        .arg(&base)
        .arg(&base)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_bmtool_refuses_to_overwrite_input_spelled_differently() {
    let dir = TempDir::new().unwrap();
    let base = write_file(&dir, "in.dat", &[k_row(1.0, 1.0)]);
    write_file(&dir, "filter.dat", &[k_row(1.0, 1.0)]);
    let before = fs::read_to_string(&base).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_bmtool"))
        .current_dir(dir.path())
        .arg("--quiet")
        .args(["diff", "in.dat", "--filters", "filter.dat", "--output", "./in.dat"])
        .status()
        .unwrap();
    assert!(!status.success());
    assert_eq!(fs::read_to_string(&base).unwrap(), before);

    let status = Command::new(env!("CARGO_BIN_EXE_bmtool"))
        .current_dir(dir.path())
        .arg("--quiet")
        .args(["union", "in.dat", "filter.dat", "--output", "./filter.dat"])
        .status()
        .unwrap();
    assert!(!status.success());
}
