//! Ordered-commit determinism tests across the pool and synchronizer.
//!
//! The core guarantee: sink contents depend only on the inputs and the
//! dispatch order, never on thread scheduling or completion order.

use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;

use fgeval_lib::matcher::ExactMatcher;
use fgeval_lib::pool::run_workers;
use fgeval_lib::progress::ProgressTracker;
use fgeval_lib::sink::SplitSinks;
use fgeval_lib::source::VecSource;
use fgeval_lib::synchronizer::EvalSynchronizer;
use fgeval_lib::variant::{RegionSet, RegionVariants, Variant};

const HEADER: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\n";

fn variant(region: &str, id: usize, start: u32, ref_allele: &str, alt: &str) -> Variant {
    Variant::new(
        id,
        start,
        ref_allele,
        vec![alt.to_string()],
        format!("{region}\t{start}\t.\t{ref_allele}\t{alt}"),
    )
}

/// Build a deterministic workload: region i carries i%4 baseline-only
/// variants, one shared site, and i%3 call-only variants.
fn build_regions(count: usize) -> Vec<RegionSet> {
    (0..count)
        .map(|i| {
            let region = format!("chr{i}");
            let mut baseline = Vec::new();
            let mut calls = Vec::new();
            // Shared site: a true positive in every region.
            baseline.push(variant(&region, 0, 100, "A", "G"));
            calls.push(variant(&region, 1, 100, "A", "G"));
            for j in 0..i % 4 {
                baseline.push(variant(&region, 10 + j, 200 + j as u32, "C", "T"));
            }
            for j in 0..i % 3 {
                calls.push(variant(&region, 20 + j, 300 + j as u32, "G", "A"));
            }
            RegionSet::new(region, RegionVariants { baseline, calls })
        })
        .collect()
}

/// Run the full pool over the workload and return the three file contents.
fn run_with_threads(dir: &Path, threads: usize, regions: Vec<RegionSet>) -> [String; 3] {
    let sinks = SplitSinks::new(
        HEADER,
        File::create(dir.join("tp.vcf")).unwrap(),
        File::create(dir.join("fp.vcf")).unwrap(),
        File::create(dir.join("fn.vcf")).unwrap(),
    )
    .unwrap();
    let sync = EvalSynchronizer::new(VecSource::new(regions), sinks);
    let progress = ProgressTracker::new("Committed regions").with_interval(1000);

    run_workers(threads, &sync, &ExactMatcher, &progress).unwrap();
    sync.close().unwrap();

    ["tp.vcf", "fp.vcf", "fn.vcf"]
        .map(|name| fs::read_to_string(dir.join(name)).unwrap())
}

/// Parallel runs produce byte-identical output to a sequential run, for
/// several pool sizes.
#[test]
fn test_parallel_output_matches_sequential() {
    let sequential_dir = TempDir::new().unwrap();
    let expected = run_with_threads(sequential_dir.path(), 1, build_regions(40));

    for threads in [2, 4, 8] {
        let dir = TempDir::new().unwrap();
        let actual = run_with_threads(dir.path(), threads, build_regions(40));
        assert_eq!(actual, expected, "output diverged with {threads} threads");
    }
}

/// Records inside each stream appear in region dispatch order.
#[test]
fn test_streams_ordered_by_dispatch() {
    let dir = TempDir::new().unwrap();
    let [tp, _fp, _fn] = run_with_threads(dir.path(), 4, build_regions(25));

    let regions: Vec<usize> = tp
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            line.split('\t').next().unwrap().trim_start_matches("chr").parse().unwrap()
        })
        .collect();
    let mut sorted = regions.clone();
    sorted.sort_unstable();
    assert_eq!(regions, sorted);
    assert_eq!(regions.len(), 25); // one true positive per region
}

/// Counter totals hold over a full parallel drain.
#[test]
fn test_counts_sum_over_parallel_drain() {
    let regions = build_regions(60);
    let total_calls: u64 = regions.iter().map(|r| r.variants.calls.len() as u64).sum();
    let total_baseline: u64 = regions.iter().map(|r| r.variants.baseline.len() as u64).sum();

    let dir = TempDir::new().unwrap();
    let sinks = SplitSinks::new(
        HEADER,
        File::create(dir.path().join("tp.vcf")).unwrap(),
        File::create(dir.path().join("fp.vcf")).unwrap(),
        File::create(dir.path().join("fn.vcf")).unwrap(),
    )
    .unwrap();
    let sync = EvalSynchronizer::new(VecSource::new(regions), sinks);
    let progress = ProgressTracker::new("Committed regions").with_interval(1000);
    run_workers(8, &sync, &ExactMatcher, &progress).unwrap();

    let counts = sync.counts();
    assert_eq!(counts.total_calls(), total_calls);
    // Every region's shared site matches, so tp == region count and the
    // remaining baseline variants are false negatives.
    assert_eq!(counts.true_positives, 60);
    assert_eq!(counts.false_negatives, total_baseline - 60);
    assert_eq!(progress.count(), 60);
    sync.close().unwrap();
}
