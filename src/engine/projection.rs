// ==========================================
// 汽修门店管理系统 - 报表行投影
// ==========================================
// 职责: 领域记录 → 统一的报表展示/导出行
// - service / revenue: 工单号 / 故障描述 / 时间 / 状态 / 金额
// - inventory: SKU / 配件名 / - / 分类 / 数量 / 低库存标记
// ==========================================
// 红线: 保持输入顺序, 不重新排序; 任何字段缺失都输出占位符, 不失败
// ==========================================

use crate::domain::{Part, ReportKind, ShopSnapshot, WorkOrder};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// 截断后缀
pub const ELLIPSIS: &str = "...";

/// 报表时间列格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// ==========================================
// ReportRow - 报表行
// ==========================================
// 字段顺序即导出 CSV 的列顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// 主标签: 工单号 / SKU
    pub primary_label: String,
    /// 副标签: 故障描述（截断）/ 配件名
    pub secondary_label: String,
    /// 创建时间（仅工单行）
    pub timestamp: Option<String>,
    /// 状态 / 分类
    pub tag: String,
    /// 金额（仅工单行, 输出为两位小数文本）
    #[serde(with = "money", default)]
    pub amount: Option<f64>,
    /// 数量（仅库存行）
    pub quantity: Option<i64>,
    /// 低库存标记（仅库存行）
    pub low_stock: Option<bool>,
}

// ==========================================
// 金额序列化: 固定两位小数
// ==========================================
// 读取时兼容数值与文本
mod money {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(amount: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match amount {
            Some(value) => serializer.serialize_str(&format!("{:.2}", value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Amount>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Amount::Number(value)) => Ok(Some(value)),
            Some(Amount::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Amount::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ==========================================
// 投影参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub label_max_chars: usize,
    pub placeholder: String,
    pub offset: FixedOffset,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            label_max_chars: 30,
            placeholder: "-".to_string(),
            offset: Utc.fix(),
        }
    }
}

pub struct ReportProjector {
    options: ProjectionOptions,
}

impl Default for ReportProjector {
    fn default() -> Self {
        Self::new(ProjectionOptions::default())
    }
}

impl ReportProjector {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// 按报表类型投影
    pub fn project(&self, kind: ReportKind, snapshot: &ShopSnapshot) -> Vec<ReportRow> {
        let rows = match kind {
            ReportKind::Service | ReportKind::Revenue => self.project_orders(&snapshot.work_orders),
            ReportKind::Inventory => self.project_parts(&snapshot.parts),
        };
        tracing::debug!(kind = %kind, rows = rows.len(), "报表行投影完成");
        rows
    }

    pub fn project_orders(&self, work_orders: &[WorkOrder]) -> Vec<ReportRow> {
        work_orders.iter().map(|w| self.order_row(w)).collect()
    }

    pub fn project_parts(&self, parts: &[Part]) -> Vec<ReportRow> {
        parts.iter().map(|p| self.part_row(p)).collect()
    }

    fn order_row(&self, order: &WorkOrder) -> ReportRow {
        let timestamp = match order.created_at {
            Some(ts) => ts
                .with_timezone(&self.options.offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => self.options.placeholder.clone(),
        };

        ReportRow {
            primary_label: self.label_or_placeholder(order.order_number.as_deref()),
            secondary_label: match order.issue_description.as_deref() {
                Some(desc) => truncate_label(desc, self.options.label_max_chars),
                None => self.options.placeholder.clone(),
            },
            timestamp: Some(timestamp),
            tag: order
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| self.options.placeholder.clone()),
            amount: Some(order.total_amount),
            quantity: None,
            low_stock: None,
        }
    }

    fn part_row(&self, part: &Part) -> ReportRow {
        ReportRow {
            primary_label: self.label_or_placeholder(part.sku.as_deref()),
            secondary_label: self.label_or_placeholder(part.name.as_deref()),
            timestamp: None,
            tag: self.label_or_placeholder(part.category.as_deref()),
            amount: None,
            quantity: Some(part.stock_level),
            low_stock: Some(part.is_low_stock()),
        }
    }

    fn label_or_placeholder(&self, value: Option<&str>) -> String {
        value
            .map(str::to_string)
            .unwrap_or_else(|| self.options.placeholder.clone())
    }
}

/// 超过 max_chars 个字符时截断并追加省略号
///
/// 按 Unicode 字符计数（泰文/中文描述不会被截成半个字符）
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(max_chars).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
