use crate::models::{IndexedDocument, SchemaCatalog, TableMetadata};

/// Builds one self-contained text document per catalog table for the
/// search backend to index.
///
/// Deterministic: identical metadata always yields an identical body,
/// so corpus refreshes are idempotent and diffable. The upload itself
/// is an external collaborator's job; this only produces the sequence.
pub fn build_documents(catalog: &SchemaCatalog) -> Vec<IndexedDocument> {
    catalog
        .tables()
        .map(|table| IndexedDocument {
            document_id: document_id(&table.name),
            table_name: table.name.clone(),
            text_body: document_body(table),
        })
        .collect()
}

/// Document ids follow the corpus populator's file naming scheme.
pub fn document_id(table_name: &str) -> String {
    format!("table_{}", table_name)
}

fn document_body(table: &TableMetadata) -> String {
    let mut body = format!("Table: {}\n", table.name);
    body.push_str(&format!("Description: {}\n", table.description));

    if !table.columns.is_empty() {
        body.push_str("\nColumns:\n");
        for column in &table.columns {
            body.push_str(&format!("- {} ({})", column.name, column.data_type));
            if let Some(desc) = &column.description {
                body.push_str(&format!(": {}", desc));
            }
            body.push('\n');
        }
    }

    if !table.keywords.is_empty() {
        // BTreeSet iteration keeps the keyword line stable across refreshes
        let keywords: Vec<&str> = table.keywords.iter().map(|k| k.as_str()).collect();
        body.push_str(&format!("\nKeywords: {}\n", keywords.join(", ")));
    }

    if !table.use_cases.is_empty() {
        body.push_str(&format!("Use cases: {}\n", table.use_cases.join(", ")));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnMetadata;

    fn sample_table() -> TableMetadata {
        TableMetadata {
            name: "cooperatives".to_string(),
            description: "Registered cooperatives".to_string(),
            columns: vec![
                ColumnMetadata {
                    name: "id".to_string(),
                    data_type: "integer".to_string(),
                    description: None,
                },
                ColumnMetadata {
                    name: "name".to_string(),
                    data_type: "varchar".to_string(),
                    description: Some("Legal name".to_string()),
                },
            ],
            keywords: ["koperasi", "cooperative"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            use_cases: vec!["count cooperatives".to_string()],
        }
    }

    #[test]
    fn test_one_document_per_table() {
        let catalog = SchemaCatalog::new(vec![sample_table(), TableMetadata::new("provinces")]);
        let docs = build_documents(&catalog);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].document_id, "table_cooperatives");
        assert_eq!(docs[0].table_name, "cooperatives");
        assert_eq!(docs[1].document_id, "table_provinces");
    }

    #[test]
    fn test_document_body_contents() {
        let catalog = SchemaCatalog::new(vec![sample_table()]);
        let docs = build_documents(&catalog);
        let body = &docs[0].text_body;

        assert!(body.starts_with("Table: cooperatives\n"));
        assert!(body.contains("Description: Registered cooperatives"));
        assert!(body.contains("- id (integer)\n"));
        assert!(body.contains("- name (varchar): Legal name\n"));
        // Keywords appear in sorted order regardless of declaration order
        assert!(body.contains("Keywords: cooperative, koperasi"));
        assert!(body.contains("Use cases: count cooperatives"));
    }

    #[test]
    fn test_identical_metadata_yields_identical_body() {
        let catalog = SchemaCatalog::new(vec![sample_table()]);
        let first = build_documents(&catalog);
        let second = build_documents(&catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bare_table_still_produces_document() {
        // Tables with no description and no columns must remain discoverable
        let catalog = SchemaCatalog::new(vec![TableMetadata::new("audit_log")]);
        let docs = build_documents(&catalog);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text_body, "Table: audit_log\nDescription: \n");
    }
}
