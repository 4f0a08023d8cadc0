// ==========================================
// 汽修门店管理系统 - 异步命令层
// ==========================================
// 职责: 在 blocking pool 中执行数据读取 + 计算, 并施加固定加载超时
// 说明: 引擎本身同步; 超时只约束数据加载这一步
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiError, ApiResult, ReportApi, ReportView};
use crate::app::state::AppState;
use crate::engine::{DashboardSummary, ExportDocument};

/// 在 blocking pool 中执行, 超时返回 LoadTimeout
///
/// 超时后后台任务不会被中断, 其结果被丢弃
async fn run_blocking<T, F>(api: Arc<ReportApi>, timeout: Duration, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ReportApi) -> ApiResult<T> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(move || f(&api));

    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ApiError::InternalError(format!(
            "任务执行失败: {}",
            join_err
        ))),
        Err(_) => {
            let timeout_ms = timeout.as_millis() as u64;
            tracing::warn!(timeout_ms, "数据加载超时");
            Err(ApiError::LoadTimeout { timeout_ms })
        }
    }
}

/// 驾驶舱汇总
pub async fn get_dashboard_summary(state: &AppState) -> ApiResult<DashboardSummary> {
    let api = state.report_api.clone();
    let timeout = api.config().load_timeout();
    let company_id = state.company_id.clone();

    run_blocking(api, timeout, move |api| api.get_dashboard_summary(&company_id)).await
}

/// 报表页数据
pub async fn get_report(
    state: &AppState,
    kind: &str,
    date_from: &str,
    date_to: &str,
) -> ApiResult<ReportView> {
    let (kind, range) = ReportApi::parse_report_request(kind, date_from, date_to)?;
    let api = state.report_api.clone();
    let timeout = api.config().load_timeout();
    let company_id = state.company_id.clone();

    run_blocking(api, timeout, move |api| api.get_report(&company_id, kind, range)).await
}

/// 报表导出（无数据时返回 None）
pub async fn export_report(
    state: &AppState,
    kind: &str,
    date_from: &str,
    date_to: &str,
) -> ApiResult<Option<ExportDocument>> {
    let view = get_report(state, kind, date_from, date_to).await?;
    state.report_api.export_view(&view)
}
