// ==========================================
// 汽修门店管理系统 - 报表 API
// ==========================================
// 职责: 数据源读取 → 边界归一 → 汇总 / 投影 / 导出
// 架构: API 层 → Repository (SnapshotSource) → Importer (FieldMapper) → Engine
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfig;
use crate::domain::{DateRange, ReportKind, ShopSnapshot, WorkOrder};
use crate::engine::{
    CsvExporter, DashboardEngine, DashboardSummary, ExportDocument, ReportProjector, ReportRow,
    ReportSummary, ReportSummaryEngine,
};
use crate::importer::{DataCleaner, FieldMapper};
use crate::repository::SnapshotSource;

// ==========================================
// ReportView - 报表页数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub kind: ReportKind,
    pub range: DateRange,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
    pub generated_at: DateTime<Utc>,
}

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    source: Arc<dyn SnapshotSource>,
    config: ReportConfig,
    mapper: FieldMapper,
    dashboard_engine: DashboardEngine,
    summary_engine: ReportSummaryEngine,
}

impl ReportApi {
    pub fn new(source: Arc<dyn SnapshotSource>, config: ReportConfig) -> Self {
        Self {
            source,
            config,
            mapper: FieldMapper::new(),
            dashboard_engine: DashboardEngine::new(),
            summary_engine: ReportSummaryEngine::new(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    // ==========================================
    // 参数解析
    // ==========================================

    /// 解析报表请求参数（类型 + 闭区间日期）
    pub fn parse_report_request(
        kind: &str,
        date_from: &str,
        date_to: &str,
    ) -> ApiResult<(ReportKind, DateRange)> {
        let kind = ReportKind::parse(kind).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "报表类型无效: {}（可选 service / inventory / revenue）",
                kind
            ))
        })?;

        let cleaner = DataCleaner;
        let start = cleaner.parse_date(date_from, "date_from")?;
        let end = cleaner.parse_date(date_to, "date_to")?;
        let range = DateRange::new(start, end).ok_or_else(|| {
            ApiError::InvalidInput(format!("开始日期晚于结束日期: {} > {}", start, end))
        })?;

        Ok((kind, range))
    }

    // ==========================================
    // 快照读取
    // ==========================================

    /// 读取并归一某门店的完整快照
    pub fn load_snapshot(&self, company_id: &str) -> ApiResult<ShopSnapshot> {
        if company_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("门店ID不能为空".to_string()));
        }

        let raw = self.source.load_raw_snapshot(company_id)?;
        Ok(self.mapper.map_snapshot(&raw))
    }

    // ==========================================
    // 驾驶舱
    // ==========================================

    pub fn get_dashboard_summary(&self, company_id: &str) -> ApiResult<DashboardSummary> {
        self.get_dashboard_summary_at(company_id, Utc::now())
    }

    /// 指定"当前时刻"的驾驶舱汇总
    pub fn get_dashboard_summary_at(
        &self,
        company_id: &str,
        now: DateTime<Utc>,
    ) -> ApiResult<DashboardSummary> {
        let snapshot = self.load_snapshot(company_id)?;
        Ok(self.summarize_dashboard(&snapshot, now))
    }

    /// 基于已读取的快照计算驾驶舱汇总
    pub fn summarize_dashboard(
        &self,
        snapshot: &ShopSnapshot,
        now: DateTime<Utc>,
    ) -> DashboardSummary {
        let clock = self.config.clock_at(now);
        self.dashboard_engine.summarize(snapshot, &clock)
    }

    // ==========================================
    // 报表
    // ==========================================

    pub fn get_report(
        &self,
        company_id: &str,
        kind: ReportKind,
        range: DateRange,
    ) -> ApiResult<ReportView> {
        self.get_report_at(company_id, kind, range, Utc::now())
    }

    pub fn get_report_at(
        &self,
        company_id: &str,
        kind: ReportKind,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> ApiResult<ReportView> {
        let snapshot = self.load_snapshot(company_id)?;
        Ok(self.build_report(snapshot, kind, range, now))
    }

    /// 基于已读取的快照生成报表
    ///
    /// 工单按区间预筛选并按创建时间倒序; 配件与客户不受区间影响
    pub fn build_report(
        &self,
        snapshot: ShopSnapshot,
        kind: ReportKind,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> ReportView {
        let options = self.config.projection_options(now);
        let offset = options.offset;

        let ShopSnapshot {
            work_orders,
            parts,
            customers,
        } = snapshot;
        let scoped = ShopSnapshot::new(
            filter_orders_by_range(work_orders, &range, offset),
            parts,
            customers,
        );

        let summary = self.summary_engine.summarize(kind, &scoped);
        let rows = ReportProjector::new(options).project(kind, &scoped);

        tracing::info!(
            kind = %kind,
            start = %range.start,
            end = %range.end,
            rows = rows.len(),
            "报表生成完成"
        );

        ReportView {
            kind,
            range,
            summary,
            rows,
            generated_at: now,
        }
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出报表 CSV
    ///
    /// # 返回
    /// - Ok(None): 报表无数据, 不生成文件
    pub fn export_report(
        &self,
        company_id: &str,
        kind: ReportKind,
        range: DateRange,
    ) -> ApiResult<Option<ExportDocument>> {
        let view = self.get_report(company_id, kind, range)?;
        self.export_view(&view)
    }

    pub fn export_view(&self, view: &ReportView) -> ApiResult<Option<ExportDocument>> {
        let exporter = CsvExporter::new(self.config.export_file_prefix.clone());
        Ok(exporter.export(&view.rows, view.kind, &view.range)?)
    }
}

/// 按闭区间筛选工单（在给定偏移下换算日期）, 并按 created_at 倒序
///
/// 无创建时间的工单不落在任何区间内
pub fn filter_orders_by_range(
    work_orders: Vec<WorkOrder>,
    range: &DateRange,
    offset: FixedOffset,
) -> Vec<WorkOrder> {
    let mut scoped: Vec<WorkOrder> = work_orders
        .into_iter()
        .filter(|w| w.created_on(offset).map(|d| range.contains(d)).unwrap_or(false))
        .collect();
    scoped.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    scoped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset, TimeZone};

    fn order(id: &str, created_at: Option<DateTime<Utc>>) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            order_number: None,
            issue_description: None,
            status: None,
            total_amount: 0.0,
            labor_cost: 0.0,
            created_at,
            customer_id: None,
            vehicle_id: None,
        }
    }

    #[test]
    fn test_parse_report_request() {
        let (kind, range) =
            ReportApi::parse_report_request("Service", "2026-10-01", "2026-10-16").unwrap();
        assert_eq!(kind, ReportKind::Service);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());

        assert!(matches!(
            ReportApi::parse_report_request("payroll", "2026-10-01", "2026-10-16"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            ReportApi::parse_report_request("service", "2026-10-16", "2026-10-01"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            ReportApi::parse_report_request("service", "16/10/2026", "2026-10-01"),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_filter_orders_by_range_inclusive_and_sorted() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
        )
        .unwrap();

        let orders = vec![
            order("first-day", Some(Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap())),
            order("last-day", Some(Utc.with_ymd_and_hms(2026, 10, 31, 23, 59, 0).unwrap())),
            order("before", Some(Utc.with_ymd_and_hms(2026, 9, 30, 23, 59, 0).unwrap())),
            order("undated", None),
        ];

        let ids: Vec<String> = filter_orders_by_range(orders, &range, Utc.fix())
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["last-day".to_string(), "first-day".to_string()]);
    }
}
