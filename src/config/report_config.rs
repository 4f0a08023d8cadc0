// ==========================================
// 汽修门店管理系统 - 报表配置
// ==========================================
// 职责: 报表/导出相关配置项的强类型表示与默认值
// ==========================================

use crate::engine::{ProjectionOptions, ReportClock};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::fmt;
use std::time::Duration;

// ==========================================
// 日界 (Day Boundary)
// ==========================================
// 判定"今天"与格式化时间时使用的时区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// 读取时刻的本机时区
    Local,
    Utc,
    /// 固定偏移（如 +07:00）
    Fixed(FixedOffset),
}

impl DayBoundary {
    /// 解析配置值: `LOCAL` / `UTC` / `+HH:MM` / `-HH:MM`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_uppercase().as_str() {
            "LOCAL" => return Some(DayBoundary::Local),
            "UTC" | "Z" => return Some(DayBoundary::Utc),
            _ => {}
        }

        let (sign, rest) = match s.as_bytes().first()? {
            b'+' => (1, &s[1..]),
            b'-' => (-1, &s[1..]),
            _ => return None,
        };
        let (h, m) = rest.split_once(':')?;
        let h: i32 = h.parse().ok()?;
        let m: i32 = m.parse().ok()?;
        if !(0..=23).contains(&h) || !(0..=59).contains(&m) {
            return None;
        }
        FixedOffset::east_opt(sign * (h * 3600 + m * 60)).map(DayBoundary::Fixed)
    }

    /// 解析为具体偏移（Local 取 now 时刻的本机偏移）
    pub fn resolve(&self, now: DateTime<Utc>) -> FixedOffset {
        match self {
            DayBoundary::Local => now.with_timezone(&Local).offset().fix(),
            DayBoundary::Utc => Utc.fix(),
            DayBoundary::Fixed(offset) => *offset,
        }
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Local => write!(f, "LOCAL"),
            DayBoundary::Utc => write!(f, "UTC"),
            DayBoundary::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

// ==========================================
// ReportConfig - 报表配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub export_file_prefix: String,
    pub label_max_chars: usize,
    pub placeholder: String,
    pub day_boundary: DayBoundary,
    pub load_timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            export_file_prefix: "Report".to_string(),
            label_max_chars: 30,
            placeholder: "-".to_string(),
            day_boundary: DayBoundary::Local,
            load_timeout_ms: 5_000,
        }
    }
}

impl ReportConfig {
    /// 基于给定时刻构造报表时钟
    pub fn clock_at(&self, now: DateTime<Utc>) -> ReportClock {
        let offset = self.day_boundary.resolve(now);
        ReportClock::new(now.with_timezone(&offset).date_naive(), offset)
    }

    pub fn projection_options(&self, now: DateTime<Utc>) -> ProjectionOptions {
        ProjectionOptions {
            label_max_chars: self.label_max_chars,
            placeholder: self.placeholder.clone(),
            offset: self.day_boundary.resolve(now),
        }
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}
