// ==========================================
// 汽修门店管理系统 - 文件解析器实现
// ==========================================
// 支持: JSON 数组 (.json) / CSV (.csv)
// 输出: 原始行（字段名 → JSON 值）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::RawRecord;
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 文件解析接口
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

fn ensure_extension(path: &Path, expected: &str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case(expected) {
        return Err(ImportError::UnsupportedFormat(ext.to_string()));
    }
    Ok(())
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 期望顶层为对象数组（存储层 REST 接口的返回格式）
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_extension(file_path, "json")?;

        let reader = BufReader::new(File::open(file_path)?);
        let value: Value = serde_json::from_reader(reader)?;

        let Value::Array(items) = value else {
            return Err(ImportError::RecordShapeError {
                row: 0,
                message: "顶层必须为数组".to_string(),
            });
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(ImportError::RecordShapeError {
                    row: idx + 1,
                    message: format!("期望对象，实际 {}", other),
                }),
            })
            .collect()
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 所有单元格按字符串读入, 数值转换交给 DataCleaner
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_extension(file_path, "csv")?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRecord::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let value = value.trim();
                    let cell = if value.is_empty() {
                        Value::Null
                    } else {
                        Value::String(value.to_string())
                    };
                    row.insert(header.clone(), cell);
                }
            }

            // 跳过完全空白的行
            if row.values().all(Value::is_null) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// 通用解析器（按扩展名分派）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => JsonParser.parse_to_raw_records(file_path),
            "csv" => CsvParser.parse_to_raw_records(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_json_parser_reads_objects() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": "p-1", "stock_level": 4}}, {{"id": "p-2", "sku": null}}]"#
        )
        .unwrap();

        let rows = JsonParser.parse_to_raw_records(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("stock_level"), Some(&Value::from(4)));
        assert_eq!(rows[1].get("sku"), Some(&Value::Null));
    }

    #[test]
    fn test_json_parser_rejects_non_array() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"id": "p-1"}}"#).unwrap();

        let err = JsonParser.parse_to_raw_records(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::RecordShapeError { row: 0, .. }));
    }

    #[test]
    fn test_csv_parser_skips_blank_rows() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "\u{feff}id,name,province").unwrap();
        writeln!(file, "c-1,Somchai,\"Bangkok, Thailand\"").unwrap();
        writeln!(file, ",,").unwrap();
        writeln!(file, "c-2,,Chiang Mai").unwrap();

        let rows = CsvParser.parse_to_raw_records(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].get("province"),
            Some(&Value::String("Bangkok, Thailand".to_string()))
        );
        assert_eq!(rows[1].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = UniversalFileParser
            .parse_to_raw_records(file.path())
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
