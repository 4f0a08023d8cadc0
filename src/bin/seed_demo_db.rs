// ==========================================
// 演示数据生成
// ==========================================
// 用法: seed_demo_db [DB_PATH] [COMPANY_ID] [ORDER_COUNT]
// 说明: 数据按序号确定性生成, 工单时间分布在最近 30 天（含今天）
// ==========================================

use chrono::{Duration, Utc};
use rusqlite::{params, Connection};
use std::error::Error;
use uuid::Uuid;

use autoshop_erp::app::get_default_db_path;
use autoshop_erp::db::{ensure_schema, open_sqlite_connection};
use autoshop_erp::domain::WorkOrderStatus;

const DEFAULT_COMPANY_ID: &str = "default";
const DEFAULT_ORDER_COUNT: usize = 120;
const HORIZON_DAYS: i64 = 30;

const PROVINCES: &[&str] = &["Bangkok", "Chiang Mai", "Khon Kaen", "Phuket", "Chon Buri"];

const STATUSES: &[WorkOrderStatus] = &[
    WorkOrderStatus::Pending,
    WorkOrderStatus::Diagnosing,
    WorkOrderStatus::WaitingParts,
    WorkOrderStatus::InProgress,
    WorkOrderStatus::Qc,
    WorkOrderStatus::Completed,
    WorkOrderStatus::Completed,
    WorkOrderStatus::Cancelled,
];

const ISSUES: &[&str] = &[
    "เปลี่ยนน้ำมันเครื่องและไส้กรอง",
    "Brake pads worn, squealing noise on front left wheel",
    "แอร์ไม่เย็น ตรวจสอบน้ำยาแอร์",
    "Engine warning light, misfire on cylinder 3",
    "Replace timing belt, water pump, and tensioner",
];

// (sku, name, category, cost, sale, stock, min)
const PARTS: &[(&str, &str, &str, f64, f64, i64, i64)] = &[
    ("OIL-5W30-4L", "Engine Oil 5W-30 4L", "Lubricants", 650.0, 890.0, 24, 10),
    ("FLT-OIL-TY01", "Oil Filter Toyota", "Filters", 120.0, 220.0, 8, 8),
    ("BRK-PAD-F01", "Front Brake Pads", "Brakes", 900.0, 1450.0, 3, 5),
    ("BLT-TIM-HN02", "Timing Belt Honda", "Engine", 1800.0, 2600.0, 6, 2),
    ("AC-GAS-R134", "Refrigerant R134a", "Air Conditioning", 350.0, 600.0, 0, 4),
    ("SPK-PLG-NGK", "Spark Plug NGK Iridium", "Ignition", 280.0, 450.0, 40, 12),
];

fn main() -> Result<(), Box<dyn Error>> {
    autoshop_erp::logging::init();

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(get_default_db_path);
    let company_id = args.next().unwrap_or_else(|| DEFAULT_COMPANY_ID.to_string());
    let order_count = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ORDER_COUNT);

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    let tx = conn.unchecked_transaction()?;
    clear_company(&tx, &company_id)?;
    let customer_ids = seed_customers(&tx, &company_id)?;
    seed_parts(&tx, &company_id)?;
    seed_work_orders(&tx, &company_id, &customer_ids, order_count)?;
    tx.commit()?;

    tracing::info!(
        db_path = %db_path,
        company_id = %company_id,
        customers = customer_ids.len(),
        parts = PARTS.len(),
        work_orders = order_count,
        "演示数据生成完成"
    );
    Ok(())
}

fn clear_company(conn: &Connection, company_id: &str) -> rusqlite::Result<()> {
    for table in ["work_orders", "parts", "customers"] {
        conn.execute(
            &format!("DELETE FROM {} WHERE company_id = ?1", table),
            params![company_id],
        )?;
    }
    Ok(())
}

fn seed_customers(conn: &Connection, company_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut ids = Vec::new();
    for (idx, province) in PROVINCES.iter().enumerate() {
        let id = Uuid::new_v4().to_string();
        let customer_type = if idx % 3 == 0 { "FLEET" } else { "INDIVIDUAL" };
        conn.execute(
            "INSERT INTO customers (id, company_id, name, phone, province, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                company_id,
                format!("Customer {:02}", idx + 1),
                format!("08{:08}", 10_000_000 + idx * 7919),
                province,
                customer_type
            ],
        )?;
        ids.push(id);
    }
    Ok(ids)
}

fn seed_parts(conn: &Connection, company_id: &str) -> rusqlite::Result<()> {
    for (sku, name, category, cost, sale, stock, min) in PARTS {
        conn.execute(
            "INSERT INTO parts (id, company_id, sku, name, category, cost_price, sale_price, stock_level, min_stock)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                Uuid::new_v4().to_string(),
                company_id,
                sku,
                name,
                category,
                cost,
                sale,
                stock,
                min
            ],
        )?;
    }
    Ok(())
}

fn seed_work_orders(
    conn: &Connection,
    company_id: &str,
    customer_ids: &[String],
    count: usize,
) -> rusqlite::Result<()> {
    let now = Utc::now();
    for idx in 0..count {
        let status = STATUSES[idx % STATUSES.len()];
        let created_at = now
            - Duration::days(idx as i64 % HORIZON_DAYS)
            - Duration::minutes((idx as i64 * 37) % 600);
        let labor = 300.0 + (idx % 5) as f64 * 150.0;
        let parts_total = 200.0 + (idx % 7) as f64 * 410.0;

        conn.execute(
            "INSERT INTO work_orders (id, company_id, order_number, status, issue_description,
                                      total_amount, labor_cost, created_at, customer_id, vehicle_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                Uuid::new_v4().to_string(),
                company_id,
                format!("WO-{}-{:04}", created_at.format("%Y%m"), idx + 1),
                status.to_db_str(),
                ISSUES[idx % ISSUES.len()],
                labor + parts_total,
                labor,
                created_at.to_rfc3339(),
                customer_ids.get(idx % customer_ids.len().max(1)),
                Option::<String>::None
            ],
        )?;
    }
    Ok(())
}
