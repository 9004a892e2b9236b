use serde::{Deserialize, Serialize};

use crate::domain::introspection::{ComplexityRecord, ReturnNullRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComplexityDto {
    pub type_identifier: String,
    pub method_identifier: String,
    pub sources_sample: String,
    #[serde(rename = "nStatementSyntax")]
    pub n_statement_syntax: usize,
    pub file_path: String,
    pub source_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReturnNullDto {
    pub type_identifier: String,
    pub sources_sample: String,
    pub file_path: String,
    pub source_line: usize,
}

impl From<ComplexityRecord> for ComplexityDto {
    fn from(r: ComplexityRecord) -> Self {
        ComplexityDto {
            type_identifier: r.type_identifier,
            method_identifier: r.method_identifier,
            sources_sample: r.sources_sample,
            n_statement_syntax: r.n_statement_syntax,
            file_path: r.file_path,
            source_line: r.source_line,
        }
    }
}

impl From<ReturnNullRecord> for ReturnNullDto {
    fn from(r: ReturnNullRecord) -> Self {
        ReturnNullDto {
            type_identifier: r.type_identifier,
            sources_sample: r.sources_sample,
            file_path: r.file_path,
            source_line: r.source_line,
        }
    }
}

/// Ordered complexity groups in their exported shape.
pub fn complexity_report(groups: Vec<Vec<ComplexityRecord>>) -> Vec<Vec<ComplexityDto>> {
    groups
        .into_iter()
        .map(|g| g.into_iter().map(ComplexityDto::from).collect())
        .collect()
}

pub fn return_null_report(records: Vec<ReturnNullRecord>) -> Vec<ReturnNullDto> {
    records.into_iter().map(ReturnNullDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_use_the_report_spelling() {
        let dto = ComplexityDto::from(ComplexityRecord {
            type_identifier: "C".into(),
            method_identifier: "M".into(),
            sources_sample: "void M()".into(),
            n_statement_syntax: 11,
            file_path: "C.cs".into(),
            source_line: 4,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "TypeIdentifier": "C",
                "MethodIdentifier": "M",
                "SourcesSample": "void M()",
                "nStatementSyntax": 11,
                "FilePath": "C.cs",
                "SourceLine": 4
            })
        );
    }

    #[test]
    fn return_null_round_trips_through_json() {
        let dto = ReturnNullDto {
            type_identifier: "C".into(),
            sources_sample: "return null;".into(),
            file_path: "C.cs".into(),
            source_line: 3,
        };
        let text = serde_json::to_string(&dto).unwrap();
        assert!(text.contains("\"SourceLine\":3"));
        assert_eq!(serde_json::from_str::<ReturnNullDto>(&text).unwrap(), dto);
    }
}
