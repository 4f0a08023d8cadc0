// ==========================================
// 汽修门店管理系统 - 报表汇总引擎
// ==========================================
// 职责: 按报表类型输出汇总指标
// - service / revenue: 工单数 / 完工数 / 营收 / 工时费 / 完工率
// - inventory: SKU 数 / 总库存 / 低库存数 / 库存价值
// ==========================================
// 红线: 纯函数; 工单为空时完工率为 0（不做除零）
// ==========================================

use crate::domain::{Part, ReportKind, ShopSnapshot, WorkOrder};
use crate::engine::dashboard::count_low_stock;
use serde::{Deserialize, Serialize};

// ==========================================
// 工单口径汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub total_orders: usize,
    pub completed: usize,
    pub revenue: f64,
    pub labor: f64,
    /// 完工率（百分比整数, 四舍五入）
    pub efficiency: u32,
}

// ==========================================
// 库存口径汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_skus: usize,
    pub total_stock: i64,
    pub low_stock_items: usize,
    pub inventory_value: f64,
}

// ==========================================
// 报表汇总（按口径区分）
// ==========================================
// 以 scope 标记口径, 避免与 ReportView.kind 混淆（revenue 报表同样是工单口径）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope")]
pub enum ReportSummary {
    #[serde(rename = "work_orders")]
    Service(ServiceSummary),
    #[serde(rename = "parts")]
    Inventory(InventorySummary),
}

pub struct ReportSummaryEngine;

impl Default for ReportSummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 按报表类型汇总
    ///
    /// service 与 revenue 共用工单口径
    pub fn summarize(&self, kind: ReportKind, snapshot: &ShopSnapshot) -> ReportSummary {
        match kind {
            ReportKind::Service | ReportKind::Revenue => {
                ReportSummary::Service(self.service_summary(&snapshot.work_orders))
            }
            ReportKind::Inventory => {
                ReportSummary::Inventory(self.inventory_summary(&snapshot.parts))
            }
        }
    }

    pub fn service_summary(&self, work_orders: &[WorkOrder]) -> ServiceSummary {
        let total_orders = work_orders.len();
        let completed = work_orders.iter().filter(|w| w.is_completed()).count();

        ServiceSummary {
            total_orders,
            completed,
            revenue: work_orders.iter().map(|w| w.total_amount).sum(),
            labor: work_orders.iter().map(|w| w.labor_cost).sum(),
            efficiency: efficiency_percent(completed, total_orders),
        }
    }

    pub fn inventory_summary(&self, parts: &[Part]) -> InventorySummary {
        InventorySummary {
            total_skus: parts.len(),
            total_stock: parts.iter().map(|p| p.stock_level).sum(),
            low_stock_items: count_low_stock(parts),
            inventory_value: parts.iter().map(|p| p.stock_value()).sum(),
        }
    }
}

/// 完工率 = round(100 × completed / total)，total = 0 时为 0
///
/// 整数运算实现四舍五入（.5 向上）
pub fn efficiency_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u32
}
