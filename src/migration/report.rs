// src/migration/report.rs

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub table: String,
    /// Posição do registro na tabela de origem (base 0).
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    pub source: String,
    pub target: String,
    pub total: usize,
    pub inserted: usize,
    pub failed: usize,
    /// Tabela inexistente na origem ou no destino (404).
    pub missing: bool,
}

/// Resultado de uma execução.
///
/// A migração não é idempotente: rodar de novo sobre o mesmo destino
/// insere os registros outra vez.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub sink: String,
    pub tables: Vec<TableReport>,
    pub failures: Vec<FailureRecord>,
}

impl MigrationReport {
    pub fn new(sink: impl Into<String>) -> Self {
        Self { sink: sink.into(), ..Default::default() }
    }

    pub fn inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    pub fn failed(&self) -> usize {
        self.tables.iter().map(|t| t.failed).sum()
    }

    pub fn skipped_tables(&self) -> Vec<&str> {
        self.tables.iter().filter(|t| t.missing).map(|t| t.source.as_str()).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Resumo legível para o terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Resumo da migração ({}) ===", self.sink);
        for table in &self.tables {
            if table.missing {
                let _ = writeln!(out, "  {} -> {}: tabela inexistente, ignorada", table.source, table.target);
                continue;
            }
            let _ = writeln!(
                out,
                "  {} -> {}: {}/{} inseridos, {} falhas",
                table.source, table.target, table.inserted, table.total, table.failed
            );
        }

        let _ = writeln!(out, "Sucessos: {}", self.inserted());
        let _ = writeln!(out, "Falhas: {}", self.failed());

        if self.has_failures() {
            let _ = writeln!(out, "Detalhes das falhas:");
            for failure in &self.failures {
                let _ = writeln!(out, "  [{}#{}] {}", failure.table, failure.index, failure.reason);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MigrationReport {
        let mut report = MigrationReport::new("xano");
        report.tables.push(TableReport {
            source: "clients".into(),
            target: "client".into(),
            total: 3,
            inserted: 2,
            failed: 1,
            missing: false,
        });
        report.tables.push(TableReport {
            source: "goals".into(),
            target: "goal".into(),
            missing: true,
            ..Default::default()
        });
        report.failures.push(FailureRecord {
            table: "clients".into(),
            index: 1,
            reason: "HTTP 400: campo obrigatório".into(),
        });
        report
    }

    #[test]
    fn totals_and_skipped() {
        let report = sample();
        assert_eq!(report.inserted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped_tables(), vec!["goals"]);
        assert!(report.has_failures());
    }

    #[test]
    fn render_lists_each_table_and_failure() {
        let text = sample().render();
        assert!(text.contains("clients -> client: 2/3 inseridos, 1 falhas"));
        assert!(text.contains("goals -> goal: tabela inexistente"));
        assert!(text.contains("Sucessos: 2"));
        assert!(text.contains("[clients#1] HTTP 400: campo obrigatório"));
    }

    #[test]
    fn empty_report_has_no_failures() {
        let report = MigrationReport::new("supabase");
        assert!(!report.has_failures());
        assert!(!report.render().contains("Detalhes"));
    }
}
