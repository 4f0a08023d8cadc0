// ==========================================
// 汽修门店管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, ReportApi};
use crate::config::{ConfigManager, ReportConfig};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::{FileSnapshotSource, ShopSnapshotRepository, SnapshotSource};

/// 应用状态
///
/// 包含报表API实例和当前门店
pub struct AppState {
    /// 数据库路径（文件数据源时为 None）
    pub db_path: Option<String>,

    /// 当前门店ID
    pub company_id: String,

    /// 报表API
    pub report_api: Arc<ReportApi>,
}

impl AppState {
    /// 基于 SQLite 镜像库创建
    ///
    /// 1. 打开共享连接并确保 schema
    /// 2. 从 config_kv 读取报表配置
    /// 3. 创建仓储与 API
    pub fn new(db_path: String, company_id: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("无法打开数据库: {}", e)))?;
        ensure_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let conn = Arc::new(Mutex::new(conn));

        let config = ConfigManager::from_connection(conn.clone()).get_report_config()?;
        tracing::debug!(?config, "报表配置加载完成");

        let source: Arc<dyn SnapshotSource> =
            Arc::new(ShopSnapshotRepository::from_connection(conn));
        let mut state = Self::with_source(source, config, company_id);
        state.db_path = Some(db_path);
        Ok(state)
    }

    /// 基于导出文件目录创建（使用默认配置或调用方提供的配置）
    pub fn from_snapshot_dir(dir: PathBuf, company_id: String, config: ReportConfig) -> Self {
        tracing::info!("初始化AppState，文件数据源: {}", dir.display());
        Self::with_source(Arc::new(FileSnapshotSource::new(dir)), config, company_id)
    }

    /// 使用任意数据源创建
    pub fn with_source(
        source: Arc<dyn SnapshotSource>,
        config: ReportConfig,
        company_id: String,
    ) -> Self {
        Self {
            db_path: None,
            company_id,
            report_api: Arc::new(ReportApi::new(source, config)),
        }
    }
}

/// 默认数据库路径: <data_dir>/autoshop-erp/autoshop.db
pub fn get_default_db_path() -> String {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autoshop-erp");

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("数据目录创建失败: {} ({})", dir.display(), e);
    }

    dir.join("autoshop.db").to_string_lossy().into_owned()
}
