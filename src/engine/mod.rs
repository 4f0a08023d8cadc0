// ==========================================
// 汽修门店管理系统 - 引擎层
// ==========================================
// 职责: 汇总 / 投影 / 导出, 全部为无状态纯函数
// 红线: Engine 不拼 SQL, 不持有快照
// ==========================================

pub mod dashboard;
pub mod exporter;
pub mod projection;
pub mod report_summary;

// 重导出核心引擎
pub use dashboard::{count_low_stock, DashboardEngine, DashboardSummary, ReportClock};
pub use exporter::{encode_csv, CsvExporter, ExportDocument, ExportError, ExportResult, UTF8_BOM};
pub use projection::{truncate_label, ProjectionOptions, ReportProjector, ReportRow};
pub use report_summary::{
    efficiency_percent, InventorySummary, ReportSummary, ReportSummaryEngine, ServiceSummary,
};
