// ==========================================
// 汽修门店管理系统 - 驾驶舱汇总引擎
// ==========================================
// 职责: 工单/配件/客户快照 → 固定结构的汇总指标
// 输入: ShopSnapshot + 报表时钟（今天 + 日界偏移）
// 输出: DashboardSummary
// ==========================================
// 红线: 无状态引擎, 所有方法都是纯函数, 不做 I/O, 不会失败
// ==========================================

use crate::domain::{Customer, Part, ShopSnapshot, WorkOrder};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ReportClock - 报表时钟
// ==========================================
// "今天"的日历日期 + 用于换算 created_at 的时区偏移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportClock {
    pub today: NaiveDate,
    pub offset: FixedOffset,
}

impl ReportClock {
    pub fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }

    /// 以 UTC 日界构造
    pub fn utc(today: NaiveDate) -> Self {
        Self {
            today,
            offset: Utc.fix(),
        }
    }

    pub fn is_today(&self, order: &WorkOrder) -> bool {
        order.created_on(self.offset) == Some(self.today)
    }
}

// ==========================================
// DashboardSummary - 驾驶舱汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today_income: f64,
    pub total_orders: usize,
    pub total_customers: usize,
    pub in_progress_count: usize,
    pub completed_count: usize,
    pub low_stock_count: usize,
    pub total_parts: usize,
}

// ==========================================
// DashboardEngine - 驾驶舱汇总引擎
// ==========================================
pub struct DashboardEngine;

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardEngine {
    pub fn new() -> Self {
        Self
    }

    /// 生成驾驶舱汇总
    pub fn summarize(&self, snapshot: &ShopSnapshot, clock: &ReportClock) -> DashboardSummary {
        self.summarize_parts(
            &snapshot.work_orders,
            &snapshot.parts,
            &snapshot.customers,
            clock,
        )
    }

    /// 生成驾驶舱汇总（分别传入三类集合）
    pub fn summarize_parts(
        &self,
        work_orders: &[WorkOrder],
        parts: &[Part],
        customers: &[Customer],
        clock: &ReportClock,
    ) -> DashboardSummary {
        let summary = DashboardSummary {
            today_income: self.today_income(work_orders, clock),
            total_orders: work_orders.len(),
            total_customers: customers.len(),
            in_progress_count: work_orders.iter().filter(|w| w.is_in_progress()).count(),
            completed_count: work_orders.iter().filter(|w| w.is_completed()).count(),
            low_stock_count: count_low_stock(parts),
            total_parts: parts.len(),
        };

        tracing::debug!(
            today = %clock.today,
            total_orders = summary.total_orders,
            in_progress = summary.in_progress_count,
            completed = summary.completed_count,
            low_stock = summary.low_stock_count,
            "驾驶舱汇总完成"
        );

        summary
    }

    /// 今日收入 = Σ total_amount（created_at 落在今天的工单）
    pub fn today_income(&self, work_orders: &[WorkOrder], clock: &ReportClock) -> f64 {
        work_orders
            .iter()
            .filter(|w| clock.is_today(w))
            .map(|w| w.total_amount)
            .sum()
    }
}

/// 低库存计数（stock_level <= min_stock）
pub fn count_low_stock(parts: &[Part]) -> usize {
    parts.iter().filter(|p| p.is_low_stock()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkOrderStatus;
    use chrono::TimeZone;

    fn clock() -> ReportClock {
        ReportClock::utc(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn order(status: Option<WorkOrderStatus>, amount: f64, day: u32) -> WorkOrder {
        WorkOrder {
            id: format!("wo-{}-{}", day, amount),
            order_number: None,
            issue_description: None,
            status,
            total_amount: amount,
            labor_cost: 0.0,
            created_at: Some(Utc.with_ymd_and_hms(2026, 10, day, 9, 0, 0).unwrap()),
            customer_id: None,
            vehicle_id: None,
        }
    }

    #[test]
    fn test_empty_snapshot_yields_zero_summary() {
        let summary = DashboardEngine::new().summarize(&ShopSnapshot::default(), &clock());
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_today_income_ignores_other_days_and_missing_dates() {
        let mut undated = order(Some(WorkOrderStatus::Pending), 999.0, 16);
        undated.created_at = None;

        let orders = vec![
            order(Some(WorkOrderStatus::Completed), 500.0, 16),
            order(Some(WorkOrderStatus::Completed), 700.0, 15),
            undated,
        ];

        let income = DashboardEngine::new().today_income(&orders, &clock());
        assert_eq!(income, 500.0);
    }
}
