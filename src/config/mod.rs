// ==========================================
// 汽修门店管理系统 - 配置层
// ==========================================
// 职责: 报表配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod report_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use report_config::{DayBoundary, ReportConfig};
