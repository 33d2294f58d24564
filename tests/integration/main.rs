//! Integration tests for the fgeval library and CLI.
//!
//! These tests validate end-to-end workflows that span multiple modules:
//! ordered parallel commits through the worker pool, and the eval command
//! from VCF inputs to classified output files.

mod helpers;
mod test_eval_command;
mod test_ordered_commit;
