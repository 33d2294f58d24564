//! Shared helpers for integration tests.

pub mod vcf_builder;
