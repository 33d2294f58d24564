//! Minimal VCF fixture generation for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// One fixture record: `(chrom, pos, ref, alt)`.
pub type Site = (&'static str, u32, &'static str, &'static str);

/// The header written to every fixture file.
pub const FIXTURE_HEADER: &str =
    "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

/// Format one record line for the given site.
#[must_use]
pub fn record_line(site: &Site) -> String {
    let (chrom, pos, ref_allele, alt) = site;
    format!("{chrom}\t{pos}\t.\t{ref_allele}\t{alt}\t.\t.\t.")
}

/// Write a VCF file containing the given sites, in order.
pub fn write_vcf(dir: &Path, name: &str, sites: &[Site]) -> PathBuf {
    let mut contents = String::from(FIXTURE_HEADER);
    for site in sites {
        contents.push_str(&record_line(site));
        contents.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write VCF fixture");
    path
}

/// Read an output stream back, returning `(chrom, pos)` per record line
/// (header lines skipped).
pub fn read_sites(path: &Path) -> Vec<(String, u32)> {
    let contents = fs::read_to_string(path).expect("Failed to read output stream");
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let mut fields = line.split('\t');
            let chrom = fields.next().expect("missing CHROM").to_string();
            let pos = fields.next().expect("missing POS").parse().expect("bad POS");
            (chrom, pos)
        })
        .collect()
}
