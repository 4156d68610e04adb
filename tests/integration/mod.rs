//! Integration test modules.

mod export_pipeline_test;
mod persistence_test;
mod repository_flow_test;
