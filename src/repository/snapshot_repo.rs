// ==========================================
// 汽修门店管理系统 - 快照数据仓储
// ==========================================
// 职责: 按门店读取工单 / 配件 / 客户原始行
// 红线: Repository 不含业务逻辑, 只读; 字段别名与时间解析复用 FieldMapper
// ==========================================

use crate::db::open_sqlite_connection;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::{FieldMapper, RawRecord, RawSnapshot};
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use serde_json::{Number, Value};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SnapshotSource - 快照数据源接口
// ==========================================
pub trait SnapshotSource: Send + Sync {
    /// 读取某门店的原始快照
    ///
    /// 工单按 created_at 倒序返回
    fn load_raw_snapshot(&self, company_id: &str) -> RepositoryResult<RawSnapshot>;
}

// ==========================================
// ShopSnapshotRepository - SQLite 数据源
// ==========================================
pub struct ShopSnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShopSnapshotRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn list_work_orders(&self, company_id: &str) -> RepositoryResult<Vec<RawRecord>> {
        let conn = self.get_conn()?;
        query_raw_records(
            &conn,
            "SELECT * FROM work_orders WHERE company_id = ?1 ORDER BY created_at DESC",
            company_id,
        )
    }

    pub fn list_parts(&self, company_id: &str) -> RepositoryResult<Vec<RawRecord>> {
        let conn = self.get_conn()?;
        query_raw_records(
            &conn,
            "SELECT * FROM parts WHERE company_id = ?1 ORDER BY sku",
            company_id,
        )
    }

    pub fn list_customers(&self, company_id: &str) -> RepositoryResult<Vec<RawRecord>> {
        let conn = self.get_conn()?;
        query_raw_records(
            &conn,
            "SELECT * FROM customers WHERE company_id = ?1 ORDER BY name",
            company_id,
        )
    }
}

impl SnapshotSource for ShopSnapshotRepository {
    fn load_raw_snapshot(&self, company_id: &str) -> RepositoryResult<RawSnapshot> {
        let snapshot = RawSnapshot {
            work_orders: self.list_work_orders(company_id)?,
            parts: self.list_parts(company_id)?,
            customers: self.list_customers(company_id)?,
        };
        tracing::debug!(
            company_id,
            work_orders = snapshot.work_orders.len(),
            parts = snapshot.parts.len(),
            customers = snapshot.customers.len(),
            "SQLite 快照读取完成"
        );
        Ok(snapshot)
    }
}

/// 执行查询, 每行转为 列名 → JSON 值
fn query_raw_records(
    conn: &Connection,
    sql: &str,
    company_id: &str,
) -> RepositoryResult<Vec<RawRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

    let rows = stmt.query_map(params![company_id], |row| {
        let mut record = RawRecord::new();
        for (idx, name) in columns.iter().enumerate() {
            record.insert(name.clone(), value_ref_to_json(row.get_ref(idx)?));
        }
        Ok(record)
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn value_ref_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => Value::Null,
    }
}

// ==========================================
// FileSnapshotSource - 文件数据源
// ==========================================
// 目录下的 work_orders / parts / customers（.json 优先于 .csv）
// 缺失的文件视为空集合
pub struct FileSnapshotSource {
    dir: PathBuf,
}

impl FileSnapshotSource {
    pub const WORK_ORDERS: &'static str = "work_orders";
    pub const PARTS: &'static str = "parts";
    pub const CUSTOMERS: &'static str = "customers";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn locate(&self, stem: &str) -> Option<PathBuf> {
        ["json", "csv"]
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", stem, ext)))
            .find(|p| p.exists())
    }

    fn load_collection(&self, stem: &str, company_id: &str) -> RepositoryResult<Vec<RawRecord>> {
        let Some(path) = self.locate(stem) else {
            tracing::warn!(dir = %self.dir.display(), collection = stem, "数据文件不存在，按空集合处理");
            return Ok(Vec::new());
        };

        let rows = UniversalFileParser.parse_to_raw_records(&path)?;
        Ok(filter_company(rows, company_id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn load_raw_snapshot(&self, company_id: &str) -> RepositoryResult<RawSnapshot> {
        let mut snapshot = RawSnapshot {
            work_orders: self.load_collection(Self::WORK_ORDERS, company_id)?,
            parts: self.load_collection(Self::PARTS, company_id)?,
            customers: self.load_collection(Self::CUSTOMERS, company_id)?,
        };

        // 与 SQLite 数据源保持一致: 工单按 created_at 倒序（按归一后的时间比较, 缺失排最后）
        let mapper = FieldMapper::new();
        snapshot
            .work_orders
            .sort_by_key(|row| Reverse(mapper.created_at(row)));

        Ok(snapshot)
    }
}

/// 行内带非空 company_id 且不匹配时剔除; 缺失或为 null 的行保留
///
/// 数值型 company_id 按字面量比较
fn filter_company(rows: Vec<RawRecord>, company_id: &str) -> Vec<RawRecord> {
    rows.into_iter()
        .filter(|row| match row.get("company_id") {
            None | Some(Value::Null) => true,
            Some(value) => DataCleaner.text(Some(value)).as_deref() == Some(company_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_ref_conversion() {
        assert_eq!(value_ref_to_json(ValueRef::Null), Value::Null);
        assert_eq!(value_ref_to_json(ValueRef::Integer(7)), json!(7));
        assert_eq!(value_ref_to_json(ValueRef::Real(1.5)), json!(1.5));
        assert_eq!(value_ref_to_json(ValueRef::Text(b"QC")), json!("QC"));
        assert_eq!(value_ref_to_json(ValueRef::Real(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_filter_company_keeps_unscoped_rows() {
        let rows: Vec<RawRecord> = vec![
            json!({"id": "a", "company_id": "c1"}),
            json!({"id": "b", "company_id": "c2"}),
            json!({"id": "c"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();

        let kept: Vec<_> = filter_company(rows, "c1")
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(kept, vec![json!("a"), json!("c")]);
    }

    #[test]
    fn test_filter_company_compares_numeric_ids() {
        let rows: Vec<RawRecord> = vec![
            json!({"id": "mine", "company_id": "1"}),
            json!({"id": "other", "company_id": 2}),
            json!({"id": "mine-numeric", "company_id": 1}),
            json!({"id": "unscoped", "company_id": null}),
            json!({"id": "blank", "company_id": "  "}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();

        let kept: Vec<_> = filter_company(rows, "1")
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(kept, vec![json!("mine"), json!("mine-numeric"), json!("unscoped")]);
    }
}
