// src/migration/runner.rs

use std::time::Duration;

use serde_json::Value;

use super::{
    client::{RecordSink, RecordSource, SinkError},
    mapping::TableMapping,
    report::{FailureRecord, MigrationReport, TableReport},
};
use crate::config::MigrationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Pausa fixa entre um registro e o próximo.
    pub record_delay: Duration,
    /// Espera antes da única nova tentativa após um 429.
    pub retry_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            record_delay: Duration::from_millis(500),
            retry_delay: Duration::from_millis(2000),
        }
    }
}

impl From<&MigrationConfig> for RunnerConfig {
    fn from(config: &MigrationConfig) -> Self {
        Self { record_delay: config.record_delay, retry_delay: config.retry_delay }
    }
}

/// Copia tabelas da origem para o destino, um registro por vez.
pub struct MigrationRunner<'a> {
    source: &'a dyn RecordSource,
    sink: &'a dyn RecordSink,
    config: RunnerConfig,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(source: &'a dyn RecordSource, sink: &'a dyn RecordSink, config: RunnerConfig) -> Self {
        Self { source, sink, config }
    }

    pub async fn probe(&self) -> Result<(), SinkError> {
        self.sink.probe().await
    }

    /// Testa a origem; falha aqui aborta a migração.
    pub async fn probe_source(&self) -> Result<(), SinkError> {
        self.source.ready().await
    }

    /// Roda os mapeamentos em ordem. Erros por registro nunca interrompem a execução.
    pub async fn run(&self, mappings: &[TableMapping]) -> MigrationReport {
        let mut report = MigrationReport::new(self.sink.name());

        for mapping in mappings {
            let table = self.migrate_table(mapping, &mut report.failures).await;
            report.tables.push(table);
        }

        tracing::info!(
            "Migração para {} concluída: {} inseridos, {} falhas",
            self.sink.name(),
            report.inserted(),
            report.failed()
        );
        report
    }

    async fn migrate_table(&self, mapping: &TableMapping, failures: &mut Vec<FailureRecord>) -> TableReport {
        let mut table = TableReport {
            source: mapping.source.to_string(),
            target: mapping.target.to_string(),
            ..Default::default()
        };

        let records = match self.source.fetch_all(mapping.source).await {
            Ok(records) => records,
            Err(SinkError::NotFound) => {
                tracing::warn!("Tabela de origem {} não existe, ignorando", mapping.source);
                table.missing = true;
                return table;
            }
            Err(e) => {
                tracing::error!("Falha ao ler {}: {}", mapping.source, e);
                failures.push(FailureRecord { table: mapping.source.to_string(), index: 0, reason: e.to_string() });
                table.failed = 1;
                return table;
            }
        };

        table.total = records.len();
        tracing::info!("{} -> {}: {} registros", mapping.source, mapping.target, records.len());

        for (index, record) in records.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.record_delay).await;
            }

            let payload = mapping.apply(record);
            match self.insert_with_retry(mapping.target, &payload).await {
                Ok(()) => table.inserted += 1,
                Err(SinkError::NotFound) => {
                    tracing::warn!("Tabela {} não existe em {}, pulando o resto", mapping.target, self.sink.name());
                    table.missing = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("{}#{} falhou: {}", mapping.source, index, e);
                    table.failed += 1;
                    failures.push(FailureRecord {
                        table: mapping.source.to_string(),
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        table
    }

    // 429 -> espera fixa e uma única nova tentativa
    async fn insert_with_retry(&self, table: &str, record: &Value) -> Result<(), SinkError> {
        match self.sink.insert(table, record).await {
            Err(SinkError::RateLimited) => {
                tracing::info!("429 em {}, nova tentativa em {:?}", table, self.config.retry_delay);
                tokio::time::sleep(self.config.retry_delay).await;
                self.sink.insert(table, record).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashMap, VecDeque},
        sync::Mutex,
    };

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::migration::datasets::BundledSource;

    /// Destino roteirizado: devolve as respostas na ordem, depois Ok.
    #[derive(Default)]
    struct ScriptedSink {
        script: Mutex<VecDeque<Result<(), SinkError>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedSink {
        fn with_script(script: Vec<Result<(), SinkError>>) -> Self {
            Self { script: Mutex::new(script.into()), ..Default::default() }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSink for ScriptedSink {
        fn name(&self) -> &str {
            "fake"
        }

        async fn probe(&self) -> Result<(), SinkError> {
            Ok(())
        }

        async fn insert(&self, table: &str, record: &Value) -> Result<(), SinkError> {
            self.calls.lock().unwrap().push((table.to_string(), record.clone()));
            self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }
    }

    fn source(rows: usize) -> BundledSource {
        let records = (0..rows).map(|i| json!({ "id": i, "name": format!("c{}", i) })).collect();
        BundledSource::new(HashMap::from([("clients".to_string(), records)]))
    }

    fn no_delay() -> RunnerConfig {
        RunnerConfig { record_delay: Duration::ZERO, retry_delay: Duration::ZERO }
    }

    const CLIENTS: TableMapping = TableMapping::new("clients", "client");

    #[tokio::test]
    async fn inserts_every_record_without_generated_fields() {
        let sink = ScriptedSink::default();
        let source = source(3);

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[CLIENTS]).await;

        assert_eq!(report.inserted(), 3);
        assert!(!report.has_failures());
        let calls = sink.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], ("client".to_string(), json!({ "name": "c0" })));
    }

    #[tokio::test]
    async fn bundled_source_is_always_ready() {
        let sink = ScriptedSink::default();
        let source = source(0);

        assert!(MigrationRunner::new(&source, &sink, no_delay()).probe_source().await.is_ok());
    }

    #[tokio::test]
    async fn retries_once_after_rate_limit() {
        let sink = ScriptedSink::with_script(vec![Err(SinkError::RateLimited), Ok(())]);
        let source = source(1);

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[CLIENTS]).await;

        assert_eq!(sink.calls().len(), 2);
        assert_eq!(report.inserted(), 1);
    }

    #[tokio::test]
    async fn second_rate_limit_counts_as_failure() {
        let sink = ScriptedSink::with_script(vec![Err(SinkError::RateLimited), Err(SinkError::RateLimited)]);
        let source = source(2);

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[CLIENTS]).await;

        // 2 tentativas do primeiro + 1 do segundo
        assert_eq!(sink.calls().len(), 3);
        assert_eq!(report.inserted(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].index, 0);
    }

    #[tokio::test]
    async fn not_found_skips_rest_of_table() {
        let sink = ScriptedSink::with_script(vec![Err(SinkError::NotFound)]);
        let source = source(3);

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[CLIENTS]).await;

        assert_eq!(sink.calls().len(), 1);
        assert!(report.tables[0].missing);
        assert!(!report.has_failures());
        assert_eq!(report.skipped_tables(), vec!["clients"]);
    }

    #[tokio::test]
    async fn rejected_records_do_not_stop_the_loop() {
        let sink = ScriptedSink::with_script(vec![
            Ok(()),
            Err(SinkError::Rejected { status: 400, body: "email inválido".into() }),
            Ok(()),
        ]);
        let source = source(3);

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[CLIENTS]).await;

        assert_eq!(report.inserted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(report.failures[0].reason.contains("email inválido"));
    }

    #[tokio::test]
    async fn missing_source_table_is_skipped() {
        let sink = ScriptedSink::default();
        let source = source(1);
        let goals = TableMapping::new("goals", "goal");

        let report = MigrationRunner::new(&source, &sink, no_delay()).run(&[goals, CLIENTS]).await;

        assert!(report.tables[0].missing);
        assert_eq!(report.tables[1].inserted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_records_and_before_retry() {
        let sink = ScriptedSink::with_script(vec![Err(SinkError::RateLimited)]);
        let source = source(3);
        let config = RunnerConfig {
            record_delay: Duration::from_millis(500),
            retry_delay: Duration::from_millis(2000),
        };

        let started = tokio::time::Instant::now();
        let report = MigrationRunner::new(&source, &sink, config).run(&[CLIENTS]).await;
        let elapsed = started.elapsed();

        assert_eq!(report.inserted(), 3);
        // 1 retry + 2 intervalos entre registros
        assert!(elapsed >= Duration::from_millis(3000));
        assert!(elapsed < Duration::from_millis(3100));
    }
}
