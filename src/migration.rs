// src/migration.rs

pub mod client;
pub mod datasets;
pub mod mapping;
pub mod report;
pub mod runner;

pub use client::{NoCodeClient, PostgrestClient, RecordSink, RecordSource, SinkError};
pub use datasets::BundledSource;
pub use mapping::{select_mappings, TableMapping, MAPPINGS};
pub use report::{FailureRecord, MigrationReport, TableReport};
pub use runner::{MigrationRunner, RunnerConfig};
