// ==========================================
// 汽修门店管理系统 - 导入层（边界归一）
// ==========================================
// 职责: 外部原始行 → 标准领域记录
// 支持: JSON, CSV, SQLite 行
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RawRecord, RawSnapshot};
pub use file_parser::{CsvParser, FileParser, JsonParser, UniversalFileParser};
