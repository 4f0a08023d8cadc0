// ==========================================
// 汽修门店管理系统 - 领域类型定义
// ==========================================
// 职责: 工单状态 / 客户类型 / 报表类型 / 日期区间
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 封闭枚举; 未知字符串在边界层归一为 None
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Pending,      // 待处理
    Diagnosing,   // 诊断中
    WaitingParts, // 等待配件
    InProgress,   // 维修中
    Qc,           // 质检
    Completed,    // 已完成
    Cancelled,    // 已取消
}

impl WorkOrderStatus {
    /// 从数据库字符串解析（大小写不敏感）
    ///
    /// 无法识别时返回 None，由调用方决定如何计数
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Some(WorkOrderStatus::Pending),
            "DIAGNOSING" => Some(WorkOrderStatus::Diagnosing),
            "WAITING_PARTS" => Some(WorkOrderStatus::WaitingParts),
            "IN_PROGRESS" => Some(WorkOrderStatus::InProgress),
            "QC" => Some(WorkOrderStatus::Qc),
            "COMPLETED" => Some(WorkOrderStatus::Completed),
            "CANCELLED" => Some(WorkOrderStatus::Cancelled),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "PENDING",
            WorkOrderStatus::Diagnosing => "DIAGNOSING",
            WorkOrderStatus::WaitingParts => "WAITING_PARTS",
            WorkOrderStatus::InProgress => "IN_PROGRESS",
            WorkOrderStatus::Qc => "QC",
            WorkOrderStatus::Completed => "COMPLETED",
            WorkOrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// 是否为终态（已完成 / 已取消）
    pub fn is_closed(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Cancelled)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ==========================================
// 客户类型 (Customer Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Individual, // 个人
    Fleet,      // 车队
}

impl CustomerType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INDIVIDUAL" => Some(CustomerType::Individual),
            "FLEET" => Some(CustomerType::Fleet),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Individual => write!(f, "INDIVIDUAL"),
            CustomerType::Fleet => write!(f, "FLEET"),
        }
    }
}

// ==========================================
// 报表类型 (Report Kind)
// ==========================================
// service / revenue 共用工单口径, inventory 使用配件口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Service,
    Inventory,
    Revenue,
}

impl ReportKind {
    /// 解析报表类型（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "service" => Some(ReportKind::Service),
            "inventory" => Some(ReportKind::Inventory),
            "revenue" => Some(ReportKind::Revenue),
            _ => None,
        }
    }

    /// 是否为工单口径报表
    pub fn is_order_based(&self) -> bool {
        !matches!(self, ReportKind::Inventory)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Service => write!(f, "SERVICE"),
            ReportKind::Inventory => write!(f, "INVENTORY"),
            ReportKind::Revenue => write!(f, "REVENUE"),
        }
    }
}

// ==========================================
// 日期区间 (Date Range)
// ==========================================
// 闭区间 [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// 创建日期区间，start 晚于 end 时返回 None
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// 单日区间
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}
