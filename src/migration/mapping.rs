// src/migration/mapping.rs

use serde_json::{Map, Value};

/// Campos gerados pelo banco de origem; o destino gera os seus.
pub const GENERATED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// Como uma tabela da origem vira uma tabela do destino.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMapping {
    pub source: &'static str,
    pub target: &'static str,
    pub drop_fields: &'static [&'static str],
    pub renames: &'static [(&'static str, &'static str)],
}

impl TableMapping {
    pub const fn new(source: &'static str, target: &'static str) -> Self {
        Self { source, target, drop_fields: GENERATED_FIELDS, renames: &[] }
    }

    pub const fn with_renames(mut self, renames: &'static [(&'static str, &'static str)]) -> Self {
        self.renames = renames;
        self
    }

    /// Remove os campos gerados e aplica as renomeações.
    /// Registros que não são objeto passam sem alteração.
    pub fn apply(&self, record: &Value) -> Value {
        let Some(obj) = record.as_object() else {
            return record.clone();
        };

        let mut out = Map::with_capacity(obj.len());
        for (key, value) in obj {
            if self.drop_fields.contains(&key.as_str()) {
                continue;
            }
            let target_key = self
                .renames
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| *to)
                .unwrap_or(key.as_str());
            out.insert(target_key.to_string(), value.clone());
        }
        Value::Object(out)
    }
}

// No backend no-code as tabelas são no singular e as FKs seguem "<tabela>_id"
pub const MAPPINGS: &[TableMapping] = &[
    TableMapping::new("clients", "client"),
    TableMapping::new("team_members", "team_member"),
    TableMapping::new("tickets", "ticket").with_renames(&[("assigned_to", "team_member_id")]),
    TableMapping::new("schedules", "schedule").with_renames(&[("member_id", "team_member_id")]),
    TableMapping::new("goals", "goal").with_renames(&[("owner_id", "team_member_id")]),
    TableMapping::new("knowledge_articles", "knowledge_article"),
    TableMapping::new("nps_responses", "nps_response"),
];

/// Seleciona os mapeamentos pelo nome da tabela de origem (ou destino).
/// Lista vazia = todos, na ordem padrão.
pub fn select_mappings(tables: &[String]) -> Result<Vec<TableMapping>, String> {
    if tables.is_empty() {
        return Ok(MAPPINGS.to_vec());
    }

    tables
        .iter()
        .map(|name| {
            MAPPINGS
                .iter()
                .find(|m| m.source == name || m.target == name)
                .copied()
                .ok_or_else(|| format!("tabela desconhecida: {}", name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drops_generated_fields_and_renames() {
        let mapping = TableMapping::new("tickets", "ticket").with_renames(&[("assigned_to", "team_member_id")]);
        let record = json!({
            "id": "abc",
            "created_at": "2024-01-01T00:00:00Z",
            "title": "Erro no boleto",
            "assigned_to": "m-1"
        });

        assert_eq!(
            mapping.apply(&record),
            json!({ "title": "Erro no boleto", "team_member_id": "m-1" })
        );
    }

    #[test]
    fn non_objects_pass_through() {
        let mapping = TableMapping::new("a", "b");
        assert_eq!(mapping.apply(&json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn selects_by_source_or_target_name() {
        let selected = select_mappings(&["tickets".into(), "client".into()]).unwrap();
        assert_eq!(selected[0].target, "ticket");
        assert_eq!(selected[1].source, "clients");

        assert_eq!(select_mappings(&[]).unwrap().len(), MAPPINGS.len());
        assert!(select_mappings(&["pedidos".into()]).is_err());
    }
}
