//! Integration test harness.

mod cli_test;
mod pipeline_test;
