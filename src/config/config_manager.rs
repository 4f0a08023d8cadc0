// ==========================================
// 汽修门店管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::report_config::{DayBoundary, ReportConfig};
use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

/// 配置键
pub mod config_keys {
    pub const EXPORT_FILE_PREFIX: &str = "export.file_prefix";
    pub const LABEL_MAX_CHARS: &str = "report.label_max_chars";
    pub const PLACEHOLDER: &str = "report.placeholder";
    pub const DAY_BOUNDARY: &str = "report.day_boundary";
    pub const LOAD_TIMEOUT_MS: &str = "app.load_timeout_ms";
}

/// 全局作用域 ID
pub const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(key, value, "配置已更新");
        Ok(())
    }

    /// 读取报表配置快照
    ///
    /// 缺失的键使用默认值; 格式错误的值记录 warn 日志后同样回退默认值
    pub fn get_report_config(&self) -> RepositoryResult<ReportConfig> {
        let defaults = ReportConfig::default();

        let export_file_prefix = self
            .get_config_value(config_keys::EXPORT_FILE_PREFIX)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.export_file_prefix);

        let label_max_chars = self.parse_or_default(
            config_keys::LABEL_MAX_CHARS,
            defaults.label_max_chars,
            |v| v.trim().parse::<usize>().ok().filter(|n| *n > 0),
        )?;

        let placeholder = self
            .get_config_value(config_keys::PLACEHOLDER)?
            .unwrap_or(defaults.placeholder);

        let day_boundary = self.parse_or_default(
            config_keys::DAY_BOUNDARY,
            defaults.day_boundary,
            DayBoundary::parse,
        )?;

        let load_timeout_ms = self.parse_or_default(
            config_keys::LOAD_TIMEOUT_MS,
            defaults.load_timeout_ms,
            |v| v.trim().parse::<u64>().ok().filter(|n| *n > 0),
        )?;

        Ok(ReportConfig {
            export_file_prefix,
            label_max_chars,
            placeholder,
            day_boundary,
            load_timeout_ms,
        })
    }

    fn parse_or_default<T>(
        &self,
        key: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> RepositoryResult<T> {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match parse(&raw) {
                Some(v) => Ok(v),
                None => {
                    tracing::warn!(key, value = %raw, "配置值格式错误，使用默认值");
                    Ok(default)
                }
            },
        }
    }
}
