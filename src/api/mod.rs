// ==========================================
// 汽修门店管理系统 - API 层
// ==========================================
// 职责: 对外业务接口（驾驶舱 / 报表 / 导出）
// ==========================================

pub mod error;
pub mod report_api;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use report_api::{filter_orders_by_range, ReportApi, ReportView};
