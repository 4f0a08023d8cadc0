// ==========================================
// 汽修门店管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、分类规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod customer;
pub mod part;
pub mod snapshot;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use customer::Customer;
pub use part::{Part, StockStatus};
pub use snapshot::ShopSnapshot;
pub use types::{CustomerType, DateRange, ReportKind, WorkOrderStatus};
pub use work_order::WorkOrder;
