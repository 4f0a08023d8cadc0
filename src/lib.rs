// ==========================================
// 汽修门店管理系统 - 报表核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 驾驶舱汇总 / 报表投影 / CSV 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 边界归一
pub mod importer;

// 数据仓储层 - 只读数据访问
pub mod repository;

// 引擎层 - 汇总 / 投影 / 导出
pub mod engine;

// 配置层 - 报表配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态与异步命令
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Customer, CustomerType, DateRange, Part, ReportKind, ShopSnapshot, StockStatus, WorkOrder,
    WorkOrderStatus,
};

pub use engine::{
    CsvExporter, DashboardEngine, DashboardSummary, ExportDocument, ReportClock, ReportProjector,
    ReportRow, ReportSummary, ReportSummaryEngine,
};

pub use api::{ApiError, ApiResult, ReportApi, ReportView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "汽修门店管理系统";
