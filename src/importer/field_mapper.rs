// ==========================================
// 汽修门店管理系统 - 字段映射器
// ==========================================
// 职责: 原始行（JSON 对象）→ 标准领域记录
// 红线: 字段别名只在此处解析一次, 引擎层只见到标准字段
// ==========================================

use crate::domain::{
    Customer, CustomerType, Part, ShopSnapshot, WorkOrder, WorkOrderStatus,
};
use crate::importer::data_cleaner::DataCleaner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 原始行: 存储层返回的扁平 JSON 对象
pub type RawRecord = Map<String, Value>;

/// 原始快照: 三类原始行集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub work_orders: Vec<RawRecord>,
    pub parts: Vec<RawRecord>,
    pub customers: Vec<RawRecord>,
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 标准字段 → 可接受的源字段名（按优先级）
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "order_number" => &["order_number", "order_no", "orderNumber"],
            "issue_description" => &["issue_description", "description", "issue"],
            "total_amount" => &["total_amount", "total", "totalAmount"],
            "labor_cost" => &["labor_cost", "labour_cost", "laborCost"],
            "created_at" => &["created_at", "createdAt"],
            "customer_id" => &["customer_id", "customerId"],
            "vehicle_id" => &["vehicle_id", "vehicleId"],
            "stock_level" => &["stock_level", "stock", "quantity"],
            "min_stock" => &["min_stock", "min_stock_level", "reorder_point"],
            "cost_price" => &["cost_price", "cost", "costPrice"],
            "sale_price" => &["sale_price", "price", "salePrice"],
            "type" => &["type", "customer_type"],
            "id" => &["id"],
            "status" => &["status"],
            "sku" => &["sku"],
            "name" => &["name"],
            "category" => &["category"],
            "phone" => &["phone"],
            "province" => &["province"],
            _ => &[],
        }
    }

    /// 取第一个存在且非 null 的别名值
    fn field<'a>(&self, row: &'a RawRecord, key: &str) -> Option<&'a Value> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .find(|v| !v.is_null())
    }

    fn text(&self, row: &RawRecord, key: &str) -> Option<String> {
        self.cleaner.text(self.field(row, key))
    }

    fn amount(&self, row: &RawRecord, key: &str) -> f64 {
        self.cleaner.amount_or_zero(self.field(row, key), key)
    }

    fn count(&self, row: &RawRecord, key: &str) -> i64 {
        self.cleaner.count_or_zero(self.field(row, key), key)
    }

    /// 工单创建时间（已解析别名, 归一到 UTC）
    pub fn created_at(&self, row: &RawRecord) -> Option<DateTime<Utc>> {
        self.cleaner.timestamp(self.field(row, "created_at"))
    }

    pub fn map_work_order(&self, row: &RawRecord) -> WorkOrder {
        let status_raw = self.text(row, "status");
        let status = status_raw.as_deref().and_then(WorkOrderStatus::parse);
        if let (Some(raw), None) = (&status_raw, status) {
            tracing::debug!(status = %raw, "未知工单状态，按缺失处理");
        }

        WorkOrder {
            id: self.text(row, "id").unwrap_or_default(),
            order_number: self.text(row, "order_number"),
            issue_description: self.text(row, "issue_description"),
            status,
            total_amount: self.amount(row, "total_amount"),
            labor_cost: self.amount(row, "labor_cost"),
            created_at: self.created_at(row),
            customer_id: self.text(row, "customer_id"),
            vehicle_id: self.text(row, "vehicle_id"),
        }
    }

    pub fn map_part(&self, row: &RawRecord) -> Part {
        Part {
            id: self.text(row, "id").unwrap_or_default(),
            sku: self.text(row, "sku"),
            name: self.text(row, "name"),
            category: self.text(row, "category"),
            cost_price: self.amount(row, "cost_price"),
            sale_price: self.amount(row, "sale_price"),
            stock_level: self.count(row, "stock_level"),
            min_stock: self.count(row, "min_stock"),
        }
    }

    pub fn map_customer(&self, row: &RawRecord) -> Customer {
        Customer {
            id: self.text(row, "id").unwrap_or_default(),
            name: self.text(row, "name"),
            phone: self.text(row, "phone"),
            province: self.text(row, "province"),
            customer_type: self.text(row, "type").as_deref().and_then(CustomerType::parse),
        }
    }

    /// 整体归一: 原始快照 → 领域快照（保持行顺序）
    pub fn map_snapshot(&self, raw: &RawSnapshot) -> ShopSnapshot {
        let snapshot = ShopSnapshot::new(
            raw.work_orders.iter().map(|r| self.map_work_order(r)).collect(),
            raw.parts.iter().map(|r| self.map_part(r)).collect(),
            raw.customers.iter().map(|r| self.map_customer(r)).collect(),
        );

        tracing::debug!(
            work_orders = snapshot.work_orders.len(),
            parts = snapshot.parts.len(),
            customers = snapshot.customers.len(),
            "原始快照归一完成"
        );

        snapshot
    }
}
