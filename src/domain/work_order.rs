// ==========================================
// 汽修门店管理系统 - 工单领域模型
// ==========================================
// 用途: 边界层归一后写入, 引擎层只读
// 红线: 金额字段在归一阶段已完成默认值替换, 此处不再出现 None
// ==========================================

use crate::domain::types::WorkOrderStatus;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrder - 维修工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    // ===== 主键 =====
    pub id: String,

    // ===== 展示字段 =====
    pub order_number: Option<String>,      // 工单号
    pub issue_description: Option<String>, // 故障描述

    // ===== 状态 =====
    pub status: Option<WorkOrderStatus>, // None = 缺失或无法识别

    // ===== 金额（非负，缺失按 0）=====
    pub total_amount: f64,
    pub labor_cost: f64,

    // ===== 时间 =====
    pub created_at: Option<DateTime<Utc>>,

    // ===== 关联 =====
    pub customer_id: Option<String>,
    pub vehicle_id: Option<String>,
}

impl WorkOrder {
    /// 是否计入"进行中"
    ///
    /// 状态缺失时同样计入进行中
    pub fn is_in_progress(&self) -> bool {
        !self.status.map(|s| s.is_closed()).unwrap_or(false)
    }

    pub fn is_completed(&self) -> bool {
        self.status == Some(WorkOrderStatus::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == Some(WorkOrderStatus::Cancelled)
    }

    /// 按给定时区偏移换算创建日期
    pub fn created_on(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.with_timezone(&offset).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(status: Option<WorkOrderStatus>) -> WorkOrder {
        WorkOrder {
            id: "wo-1".to_string(),
            order_number: None,
            issue_description: None,
            status,
            total_amount: 0.0,
            labor_cost: 0.0,
            created_at: None,
            customer_id: None,
            vehicle_id: None,
        }
    }

    #[test]
    fn test_missing_status_counts_as_in_progress() {
        assert!(order(None).is_in_progress());
        assert!(order(Some(WorkOrderStatus::Qc)).is_in_progress());
        assert!(!order(Some(WorkOrderStatus::Completed)).is_in_progress());
        assert!(!order(Some(WorkOrderStatus::Cancelled)).is_in_progress());
    }

    #[test]
    fn test_created_on_respects_offset() {
        let mut wo = order(None);
        // 2026-10-15 20:30 UTC = 2026-10-16 03:30 (+07:00)
        wo.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 15, 20, 30, 0).unwrap());

        let utc = FixedOffset::east_opt(0).unwrap();
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(wo.created_on(utc), NaiveDate::from_ymd_opt(2026, 10, 15));
        assert_eq!(wo.created_on(bangkok), NaiveDate::from_ymd_opt(2026, 10, 16));
    }
}
