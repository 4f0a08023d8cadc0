// ==========================================
// 报表 API 集成测试（SQLite 镜像库）
// ==========================================
// 职责: AppState → ReportApi → SnapshotSource → Engine 全链路
// ==========================================


use autoshop_erp::api::ApiError;
use autoshop_erp::app::AppState;
use autoshop_erp::config::{config_keys, ConfigManager};
use autoshop_erp::engine::{InventorySummary, ReportSummary, UTF8_BOM};
use autoshop_erp::{DateRange, ReportKind};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tempfile::NamedTempFile;
use test_helpers::{
    create_test_db, insert_customer, insert_part, insert_work_order, open_test_connection,
    PartRow, WorkOrderRow,
};

const SHOP_A: &str = "shop-a";
const SHOP_B: &str = "shop-b";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
}

fn october() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    )
    .unwrap()
}

/// 两家门店的测试数据; day_boundary 默认设为 UTC
fn seeded_db(day_boundary: &str) -> (NamedTempFile, String) {
    autoshop_erp::logging::init_test();
    let (temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    let orders = [
        WorkOrderRow::new(SHOP_A, "wo-1")
            .status("COMPLETED")
            .amounts(500.0, 200.0)
            .created_at("2026-10-16T09:00:00Z")
            .issue("Engine warning light, misfire on cylinder 3"),
        WorkOrderRow::new(SHOP_A, "wo-2")
            .status("PENDING")
            .amounts(300.0, 100.0)
            .created_at("2026-10-16 14:30:00"),
        WorkOrderRow::new(SHOP_A, "wo-3")
            .status("CANCELLED")
            .created_at("2026-10-10T08:00:00Z"),
        WorkOrderRow::new(SHOP_A, "wo-4")
            .amounts(1000.0, 0.0)
            .created_at("2026-09-30T23:00:00Z"),
        WorkOrderRow::new(SHOP_A, "wo-5")
            .status("IN_PROGRESS")
            .amounts(50.0, 0.0),
        WorkOrderRow::new(SHOP_B, "wo-b1")
            .status("COMPLETED")
            .amounts(9999.0, 0.0)
            .created_at("2026-10-16T10:00:00Z"),
    ];
    for row in &orders {
        insert_work_order(&conn, row).unwrap();
    }

    let parts = [
        PartRow::new(SHOP_A, "p-1", "OIL")
            .name("Engine Oil 5W-30")
            .cost(650.0)
            .stock(24, 10),
        PartRow::new(SHOP_A, "p-2", "PADS")
            .name("Front Brake Pads")
            .cost(900.0)
            .stock(5, 5),
        PartRow::new(SHOP_A, "p-3", "GAS").min_stock(4),
        PartRow::new(SHOP_B, "p-b1", "OIL")
            .name("Engine Oil")
            .cost(1.0)
            .stock(1, 0),
    ];
    for row in &parts {
        insert_part(&conn, row).unwrap();
    }

    insert_customer(&conn, SHOP_A, "c-1", "Somchai", "Bangkok").unwrap();
    insert_customer(&conn, SHOP_A, "c-2", "Malee", "Chiang Mai").unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_config_value(config_keys::DAY_BOUNDARY, day_boundary)
        .unwrap();

    (temp_file, db_path)
}

fn state_for(db_path: &str, company_id: &str) -> AppState {
    AppState::new(db_path.to_string(), company_id.to_string()).unwrap()
}

#[test]
fn test_dashboard_summary_from_sqlite() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, SHOP_A);

    let summary = state
        .report_api
        .get_dashboard_summary_at(SHOP_A, now())
        .unwrap();

    assert_eq!(summary.today_income, 800.0);
    assert_eq!(summary.total_orders, 5);
    assert_eq!(summary.completed_count, 1);
    // PENDING + 缺失状态 + IN_PROGRESS
    assert_eq!(summary.in_progress_count, 3);
    assert_eq!(summary.low_stock_count, 2);
    assert_eq!(summary.total_parts, 3);
    assert_eq!(summary.total_customers, 2);
}

#[test]
fn test_companies_are_isolated() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, SHOP_B);

    let summary = state
        .report_api
        .get_dashboard_summary_at(SHOP_B, now())
        .unwrap();
    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.today_income, 9999.0);
    assert_eq!(summary.total_parts, 1);
    assert_eq!(summary.total_customers, 0);
}

#[test]
fn test_service_report_filters_and_sorts() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, SHOP_A);

    let view = state
        .report_api
        .get_report_at(SHOP_A, ReportKind::Service, october(), now())
        .unwrap();

    let labels: Vec<&str> = view.rows.iter().map(|r| r.primary_label.as_str()).collect();
    assert_eq!(labels, vec!["WO-wo-2", "WO-wo-1", "WO-wo-3"]);
    assert_eq!(view.rows[1].secondary_label, "Engine warning light, misfire ...");
    assert_eq!(view.rows[2].amount, Some(0.0));
    assert_eq!(view.generated_at, now());

    match view.summary {
        ReportSummary::Service(s) => {
            assert_eq!(s.total_orders, 3);
            assert_eq!(s.completed, 1);
            assert_eq!(s.revenue, 800.0);
            assert_eq!(s.labor, 300.0);
            assert_eq!(s.efficiency, 33);
        }
        other => panic!("Expected Service summary, got {:?}", other),
    }
}

#[test]
fn test_day_boundary_shifts_range_membership() {
    // +07:00 下 wo-4 (09-30 23:00Z) 落在 10-01
    let (_tmp, db_path) = seeded_db("+07:00");
    let state = state_for(&db_path, SHOP_A);

    let view = state
        .report_api
        .get_report_at(SHOP_A, ReportKind::Revenue, october(), now())
        .unwrap();

    assert_eq!(view.rows.len(), 4);
    assert_eq!(view.rows[3].primary_label, "WO-wo-4");
    assert_eq!(view.rows[3].timestamp.as_deref(), Some("2026-10-01 06:00"));
}

#[test]
fn test_inventory_report_ignores_range() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, SHOP_A);

    let single_day = DateRange::single_day(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    let view = state
        .report_api
        .get_report_at(SHOP_A, ReportKind::Inventory, single_day, now())
        .unwrap();

    let skus: Vec<&str> = view.rows.iter().map(|r| r.primary_label.as_str()).collect();
    assert_eq!(skus, vec!["GAS", "OIL", "PADS"]);
    assert_eq!(view.rows[0].secondary_label, "-");
    assert_eq!(view.rows[0].quantity, Some(0));
    assert_eq!(view.rows[0].low_stock, Some(true));

    assert_eq!(
        view.summary,
        ReportSummary::Inventory(InventorySummary {
            total_skus: 3,
            total_stock: 29,
            low_stock_items: 2,
            inventory_value: 20100.0,
        })
    );
}

#[test]
fn test_export_uses_configured_prefix() {
    let (_tmp, db_path) = seeded_db("UTC");
    ConfigManager::new(&db_path)
        .unwrap()
        .set_config_value(config_keys::EXPORT_FILE_PREFIX, "Garage")
        .unwrap();
    let state = state_for(&db_path, SHOP_A);

    let view = state
        .report_api
        .get_report_at(SHOP_A, ReportKind::Service, october(), now())
        .unwrap();
    let doc = state.report_api.export_view(&view).unwrap().unwrap();

    assert_eq!(doc.filename, "Garage_SERVICE_2026-10-01_to_2026-10-16.csv");
    assert!(doc.content.starts_with(UTF8_BOM));
    let text = std::str::from_utf8(&doc.content[UTF8_BOM.len()..]).unwrap();
    // 表头 + 3 行
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("WO-wo-2,-,2026-10-16 14:30,PENDING,300.00,,"));
}

#[test]
fn test_unknown_company_has_no_export() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, "shop-empty");

    let summary = state
        .report_api
        .get_dashboard_summary_at("shop-empty", now())
        .unwrap();
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.today_income, 0.0);

    let doc = state
        .report_api
        .export_report("shop-empty", ReportKind::Inventory, october())
        .unwrap();
    assert!(doc.is_none());
}

#[test]
fn test_blank_company_id_is_rejected() {
    let (_tmp, db_path) = seeded_db("UTC");
    let state = state_for(&db_path, SHOP_A);

    let err = state.report_api.load_snapshot("  ").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(err.code(), "INVALID_INPUT");
}
