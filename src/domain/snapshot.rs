// ==========================================
// 汽修门店管理系统 - 数据快照
// ==========================================
// 职责: 承载一次读取得到的三类记录集合
// 红线: 不可变值, 引擎只借用不修改, 调用之间不保留任何状态
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::part::Part;
use crate::domain::work_order::WorkOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub work_orders: Vec<WorkOrder>,
    pub parts: Vec<Part>,
    pub customers: Vec<Customer>,
}

impl ShopSnapshot {
    pub fn new(work_orders: Vec<WorkOrder>, parts: Vec<Part>, customers: Vec<Customer>) -> Self {
        Self {
            work_orders,
            parts,
            customers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty() && self.parts.is_empty() && self.customers.is_empty()
    }
}
