// ==========================================
// 汽修门店管理系统 - 客户领域模型
// ==========================================

use crate::domain::types::CustomerType;
use serde::{Deserialize, Serialize};

/// 客户（只读快照，录入校验在外部表单完成）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub province: Option<String>,
    pub customer_type: Option<CustomerType>,
}
