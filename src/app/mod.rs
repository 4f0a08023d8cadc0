// ==========================================
// 汽修门店管理系统 - 应用层
// ==========================================

pub mod commands;
pub mod state;

pub use state::{get_default_db_path, AppState};
