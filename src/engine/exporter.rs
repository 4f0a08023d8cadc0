// ==========================================
// 汽修门店管理系统 - CSV 导出器
// ==========================================
// 职责: 报表行 → 带 BOM 的 CSV 字节 + 确定性文件名
// 规则:
// - 表头 = 首行字段名
// - 含逗号 / 引号的字段加引号, 内部引号加倍
// - None → 空字段
// - 输入为空时不生成文件
// ==========================================

use crate::domain::{DateRange, ReportKind};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// UTF-8 BOM（保证表格软件按 UTF-8 打开）
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 默认文件名前缀
pub const DEFAULT_FILE_PREFIX: &str = "Report";

// ==========================================
// 导出错误
// ==========================================
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("导出缓冲区刷新失败: {0}")]
    Flush(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// ExportDocument - 导出文档
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

impl ExportDocument {
    /// 写入目录, 返回完整路径
    pub fn write_to_dir(&self, dir: &Path) -> ExportResult<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        tracing::info!(path = %path.display(), bytes = self.content.len(), "导出文件已写入");
        Ok(path)
    }
}

// ==========================================
// CsvExporter
// ==========================================
pub struct CsvExporter {
    file_prefix: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_PREFIX)
    }
}

impl CsvExporter {
    pub fn new(file_prefix: impl Into<String>) -> Self {
        Self {
            file_prefix: file_prefix.into(),
        }
    }

    /// 导出报表
    ///
    /// # 返回
    /// - Ok(None): 输入为空, 不生成文件
    /// - Ok(Some(doc)): 文件名 + 内容
    pub fn export<T: Serialize>(
        &self,
        rows: &[T],
        kind: ReportKind,
        range: &DateRange,
    ) -> ExportResult<Option<ExportDocument>> {
        let Some(content) = encode_csv(rows)? else {
            tracing::info!(kind = %kind, "报表无数据，跳过导出");
            return Ok(None);
        };

        let filename = self.file_name(kind, range);
        tracing::info!(filename = %filename, rows = rows.len(), "报表导出完成");

        Ok(Some(ExportDocument { filename, content }))
    }

    /// `<PREFIX>_<REPORT_KIND>_<START>_to_<END>.csv`
    pub fn file_name(&self, kind: ReportKind, range: &DateRange) -> String {
        format!(
            "{}_{}_{}_to_{}.csv",
            self.file_prefix,
            kind,
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        )
    }
}

/// 行集合 → BOM + CSV 字节; 空集合返回 None
pub fn encode_csv<T: Serialize>(rows: &[T]) -> ExportResult<Option<Vec<u8>>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    for row in rows {
        writer.serialize(row)?;
    }

    let content = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(Some(content))
}
