//! Indented JSON report output.

use std::fs;
use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use super::ReportExporter;

pub struct JsonExporter;

impl JsonExporter {
    pub fn to_json<T: Serialize + ?Sized>(report: &T) -> io::Result<String> {
        serde_json::to_string_pretty(report).map_err(io::Error::from)
    }
}

impl ReportExporter for JsonExporter {
    fn export<T: Serialize + ?Sized>(&self, report: &T, path: Option<&str>) -> io::Result<()> {
        let json = Self::to_json(report)?;
        match path {
            Some(path) => {
                fs::write(path, json + "\n")?;
                debug!(path, "report written");
                Ok(())
            }
            None => {
                let mut out = io::stdout().lock();
                writeln!(out, "{json}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ReturnNullDto;

    #[test]
    fn writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = vec![ReturnNullDto {
            type_identifier: "C".into(),
            sources_sample: "return null;".into(),
            file_path: "C.cs".into(),
            source_line: 2,
        }];
        JsonExporter.export(&report, path.to_str()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n  {\n    \"TypeIdentifier\": \"C\","));
        assert!(written.ends_with("]\n"));
    }
}
