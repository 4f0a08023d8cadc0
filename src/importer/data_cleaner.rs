// ==========================================
// 汽修门店管理系统 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值默认值替换 / 时间戳解析
// 红线: 缺失或非数值的数值字段一律替换为 0, 且每次替换都记录 debug 日志
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub struct DataCleaner;

impl DataCleaner {
    /// 文本字段: 去首尾空白, 空串视为缺失
    ///
    /// 数字 / 布尔值按字面量转为字符串
    pub fn text(&self, value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// 金额字段: 缺失 / 非数值 / 非有限值 → 0.0
    pub fn amount_or_zero(&self, value: Option<&Value>, field: &str) -> f64 {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(v) if v.is_finite() => v,
            _ => {
                tracing::debug!(field, raw = ?value, "数值字段缺失或无法解析，按 0 处理");
                0.0
            }
        }
    }

    /// 数量字段: 缺失 / 非数值 → 0; 小数截断; 负数截为 0
    pub fn count_or_zero(&self, value: Option<&Value>, field: &str) -> i64 {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(truncate_count)),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(truncate_count)
                })
            }
            _ => None,
        };

        match parsed {
            Some(v) if v >= 0 => v,
            Some(v) => {
                tracing::debug!(field, value = v, "数量字段为负数，按 0 处理");
                0
            }
            None => {
                tracing::debug!(field, raw = ?value, "数量字段缺失或无法解析，按 0 处理");
                0
            }
        }
    }

    /// 时间戳字段 → UTC
    ///
    /// 支持:
    /// - RFC3339（带时区偏移）
    /// - `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS[.f]`（无时区，按 UTC）
    /// - `YYYY-MM-DD`（当日 00:00 UTC）
    pub fn timestamp(&self, value: Option<&Value>) -> Option<DateTime<Utc>> {
        let raw = self.text(value)?;

        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Some(ts.with_timezone(&Utc));
        }

        for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, fmt) {
                return Some(naive.and_utc());
            }
        }

        if let Ok(day) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }

        tracing::debug!(raw = %raw, "时间戳无法解析，按缺失处理");
        None
    }

    /// 严格日期解析（用于查询参数，不做默认值替换）
    pub fn parse_date(&self, value: &str, field: &str) -> ImportResult<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
            ImportError::DateFormatError {
                field: field.to_string(),
                value: value.to_string(),
            }
        })
    }
}

/// 小数数量向零截断
fn truncate_count(value: f64) -> i64 {
    value.trunc() as i64
}
