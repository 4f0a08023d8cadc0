// ==========================================
// 汽修门店管理系统 - 配件领域模型
// ==========================================
// 红线: 低库存判定 stock_level <= min_stock（相等也算低库存）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Part - 配件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub sku: Option<String>, // 同一门店内唯一
    pub name: Option<String>,
    pub category: Option<String>,

    // ===== 价格（缺失按 0）=====
    pub cost_price: f64,
    pub sale_price: f64,

    // ===== 库存（非负整数，缺失按 0）=====
    pub stock_level: i64,
    pub min_stock: i64,
}

impl Part {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_level <= self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Sufficient
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_status() == StockStatus::Low
    }

    /// 库存成本价值 = cost_price × stock_level
    pub fn stock_value(&self) -> f64 {
        self.cost_price * self.stock_level as f64
    }
}

// ==========================================
// 库存状态 (Stock Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Low,        // 低于或等于补货线
    Sufficient, // 充足
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Low => write!(f, "LOW"),
            StockStatus::Sufficient => write!(f, "SUFFICIENT"),
        }
    }
}
