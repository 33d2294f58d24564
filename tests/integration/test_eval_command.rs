//! Integration tests for the eval command.

use std::fs;
use std::path::Path;
use std::process::Command;

use fgoxide::io::DelimFile;
use tempfile::TempDir;

use fgeval_lib::metrics::EvalMetrics;

use crate::helpers::vcf_builder::{read_sites, write_vcf, Site};

const BASELINE_SITES: &[Site] = &[
    ("name1", 4, "C", "G"),
    ("name1", 8, "C", "G"),
    ("name2", 3, "A", "G"),
    ("name2", 7, "A", "G"),
];

const CALL_SITES: &[Site] = &[
    ("name1", 4, "C", "G"),
    ("name1", 6, "C", "G"),
    ("name2", 3, "A", "G"),
    ("name2", 5, "A", "G"),
];

fn run_eval(baseline: &Path, calls: &Path, out: &Path, extra: &[&str]) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_fgeval"))
        .args([
            "eval",
            "-b",
            baseline.to_str().unwrap(),
            "-c",
            calls.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .args(extra)
        .status()
        .expect("Failed to run eval command")
}

/// Two regions, each with one true positive, one false positive, and one
/// false negative; classified streams keep region order and input order.
#[test]
fn test_eval_classifies_and_orders_records() {
    let dir = TempDir::new().unwrap();
    let baseline = write_vcf(dir.path(), "baseline.vcf", BASELINE_SITES);
    let calls = write_vcf(dir.path(), "calls.vcf", CALL_SITES);
    let out = dir.path().join("out");

    let status = run_eval(&baseline, &calls, &out, &["-t", "3"]);
    assert!(status.success(), "eval command failed");

    assert_eq!(
        read_sites(&out.join("tp.vcf")),
        vec![("name1".to_string(), 4), ("name2".to_string(), 3)]
    );
    assert_eq!(
        read_sites(&out.join("fp.vcf")),
        vec![("name1".to_string(), 6), ("name2".to_string(), 5)]
    );
    assert_eq!(
        read_sites(&out.join("fn.vcf")),
        vec![("name1".to_string(), 8), ("name2".to_string(), 7)]
    );
}

/// Every output stream starts with the shared header block.
#[test]
fn test_eval_output_streams_share_header() {
    let dir = TempDir::new().unwrap();
    let baseline = write_vcf(dir.path(), "baseline.vcf", BASELINE_SITES);
    let calls = write_vcf(dir.path(), "calls.vcf", CALL_SITES);
    let out = dir.path().join("out");

    assert!(run_eval(&baseline, &calls, &out, &[]).success());

    for name in ["tp.vcf", "fp.vcf", "fn.vcf"] {
        let contents = fs::read_to_string(out.join(name)).unwrap();
        assert!(contents.starts_with("##fileformat="), "{name} missing header");
        let header_lines: Vec<&str> =
            contents.lines().take_while(|l| l.starts_with('#')).collect();
        assert!(header_lines.last().unwrap().starts_with("#CHROM"), "{name} missing column line");
    }
}

/// Summary metrics reflect the classified counts.
#[test]
fn test_eval_writes_summary_metrics() {
    let dir = TempDir::new().unwrap();
    let baseline = write_vcf(dir.path(), "baseline.vcf", BASELINE_SITES);
    let calls = write_vcf(dir.path(), "calls.vcf", CALL_SITES);
    let out = dir.path().join("out");
    let summary = dir.path().join("summary.txt");

    let status =
        run_eval(&baseline, &calls, &out, &["--summary", summary.to_str().unwrap()]);
    assert!(status.success());

    let rows: Vec<EvalMetrics> = DelimFile::default().read_tsv(&summary).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].true_positives, 2);
    assert_eq!(rows[0].false_positives, 2);
    assert_eq!(rows[0].false_negatives, 2);
    assert!((rows[0].precision - 0.5).abs() < 1e-9);
}

/// Output is byte-identical across worker pool sizes.
#[test]
fn test_eval_deterministic_across_thread_counts() {
    let dir = TempDir::new().unwrap();

    // A larger workload across several regions.
    let mut baseline_sites: Vec<Site> = Vec::new();
    let mut call_sites: Vec<Site> = Vec::new();
    for i in 0..12u32 {
        let chrom: &'static str = Box::leak(format!("chr{i}").into_boxed_str());
        for j in 0..6u32 {
            baseline_sites.push((chrom, 10 * (j + 1), "A", "G"));
            // Even sites match, odd sites are call-only.
            if j % 2 == 0 {
                call_sites.push((chrom, 10 * (j + 1), "A", "G"));
            } else {
                call_sites.push((chrom, 10 * (j + 1) + 1, "A", "G"));
            }
        }
    }
    let baseline = write_vcf(dir.path(), "baseline.vcf", &baseline_sites);
    let calls = write_vcf(dir.path(), "calls.vcf", &call_sites);

    let out_single = dir.path().join("out_t1");
    let out_pooled = dir.path().join("out_t8");
    assert!(run_eval(&baseline, &calls, &out_single, &["-t", "1"]).success());
    assert!(run_eval(&baseline, &calls, &out_pooled, &["-t", "8"]).success());

    for name in ["tp.vcf", "fp.vcf", "fn.vcf"] {
        let single = fs::read(out_single.join(name)).unwrap();
        let pooled = fs::read(out_pooled.join(name)).unwrap();
        assert_eq!(single, pooled, "{name} diverged between thread counts");
    }
}

/// Missing inputs fail the command without creating output.
#[test]
fn test_eval_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let calls = write_vcf(dir.path(), "calls.vcf", CALL_SITES);
    let out = dir.path().join("out");

    let status = run_eval(&dir.path().join("absent.vcf"), &calls, &out, &[]);
    assert!(!status.success());
    assert!(!out.join("tp.vcf").exists());
}
