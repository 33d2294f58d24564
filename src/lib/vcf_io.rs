//! VCF reading helpers for the evaluation command.
//!
//! The synchronizer and sinks deal only in preserialized record lines; this
//! module is where noodles touches the inputs. It loads the baseline and
//! calls files, serializes each record back to its line once up front, and
//! groups records by reference sequence name into ordered per-region sets.

use std::collections::HashMap;
use std::path::Path;

use noodles::vcf;

use crate::errors::Result;
use crate::variant::{RegionSet, RegionVariants, Variant};

/// Serialize a VCF header to the text block emitted at the top of each
/// output stream.
///
/// # Errors
///
/// Returns an error if header serialization fails.
pub fn serialize_header(header: &vcf::Header) -> Result<String> {
    let mut writer = vcf::io::Writer::new(Vec::new());
    writer.write_header(header)?;
    Ok(String::from_utf8_lossy(writer.get_ref()).into_owned())
}

/// One parsed input file: its header and `(region, variant)` pairs in file
/// order.
struct LoadedVcf {
    header: vcf::Header,
    records: Vec<(String, Variant)>,
}

fn load_vcf(path: &Path) -> Result<LoadedVcf> {
    let mut reader = vcf::io::reader::Builder::default().build_from_path(path)?;
    let header = reader.read_header()?;

    // One writer reused to serialize every record back to its line.
    let mut writer = vcf::io::Writer::new(Vec::new());
    let mut records = Vec::new();
    for (id, result) in reader.record_bufs(&header).enumerate() {
        let record = result?;
        let region = record.reference_sequence_name().to_string();
        let start = record.variant_start().map_or(0, usize::from) as u32;
        let ref_allele = record.reference_bases().to_string();
        let alt_alleles: Vec<String> = record.alternate_bases().as_ref().to_vec();

        writer.get_mut().clear();
        writer.write_variant_record(&header, &record)?;
        let line = String::from_utf8_lossy(writer.get_ref()).trim_end().to_string();

        records.push((region, Variant::new(id, start, ref_allele, alt_alleles, line)));
    }
    Ok(LoadedVcf { header, records })
}

/// Load the baseline and calls files and group their records into ordered
/// per-region sets.
///
/// Region order is first appearance: all regions seen in the baseline file
/// (in file order), then any regions seen only in the calls file. Within a
/// region, variants keep file order. The calls header is returned as the
/// shared header block for the output streams.
///
/// # Errors
///
/// Returns an error if either file cannot be opened or parsed.
pub fn read_regions(baseline: &Path, calls: &Path) -> Result<(vcf::Header, Vec<RegionSet>)> {
    let baseline_vcf = load_vcf(baseline)?;
    let calls_vcf = load_vcf(calls)?;

    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sets: Vec<RegionVariants> = Vec::new();

    let mut slot = |region: &str, sets: &mut Vec<RegionVariants>| -> usize {
        *index.entry(region.to_string()).or_insert_with(|| {
            order.push(region.to_string());
            sets.push(RegionVariants::default());
            sets.len() - 1
        })
    };

    for (region, variant) in baseline_vcf.records {
        let i = slot(&region, &mut sets);
        sets[i].baseline.push(variant);
    }
    for (region, variant) in calls_vcf.records {
        let i = slot(&region, &mut sets);
        sets[i].calls.push(variant);
    }

    let regions =
        order.into_iter().zip(sets).map(|(region, variants)| RegionSet::new(region, variants));
    Ok((calls_vcf.header, regions.collect()))
}
