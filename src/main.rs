// ==========================================
// 汽修门店管理系统 - 命令行入口
// ==========================================
// 子命令: dashboard / report / export
// 输出: stdout 为 JSON, 日志写 stderr
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use autoshop_erp::api::ApiError;
use autoshop_erp::app::{commands, get_default_db_path, AppState};
use autoshop_erp::config::ReportConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "autoshop-erp", version, about = "汽修门店报表工具")]
struct Cli {
    /// SQLite 镜像库路径（默认位于用户数据目录）
    #[arg(long, global = true)]
    db: Option<String>,

    /// 从导出文件目录读取（work_orders/parts/customers .json|.csv）
    #[arg(long, global = true, conflicts_with = "db")]
    snapshot_dir: Option<PathBuf>,

    /// 门店ID
    #[arg(long, global = true, default_value = "default")]
    company: String,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 驾驶舱汇总
    Dashboard,

    /// 报表汇总 + 明细行
    Report {
        /// service / inventory / revenue
        #[arg(long)]
        kind: String,
        /// 开始日期 YYYY-MM-DD（含）
        #[arg(long)]
        from: String,
        /// 结束日期 YYYY-MM-DD（含）
        #[arg(long)]
        to: String,
    },

    /// 导出报表 CSV
    Export {
        #[arg(long)]
        kind: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// 输出目录
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json_log {
        autoshop_erp::logging::init_json();
    } else {
        autoshop_erp::logging::init();
    }

    tracing::debug!("系统版本: {}", autoshop_erp::VERSION);

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<ApiError>() {
            Some(api_err) => {
                let response = api_err.to_response();
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("{}", api_err),
                }
            }
            None => eprintln!("错误: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = match cli.snapshot_dir {
        Some(dir) => AppState::from_snapshot_dir(dir, cli.company, ReportConfig::default()),
        None => {
            let db_path = cli.db.unwrap_or_else(get_default_db_path);
            AppState::new(db_path, cli.company)?
        }
    };

    match cli.command {
        Command::Dashboard => {
            let summary = commands::get_dashboard_summary(&state).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Report { kind, from, to } => {
            let view = commands::get_report(&state, &kind, &from, &to).await?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Export {
            kind,
            from,
            to,
            out,
        } => match commands::export_report(&state, &kind, &from, &to).await? {
            Some(doc) => {
                let path = doc
                    .write_to_dir(&out)
                    .with_context(|| format!("无法写入目录 {}", out.display()))?;
                println!(
                    "{}",
                    serde_json::json!({ "exported": true, "path": path.display().to_string() })
                );
            }
            None => {
                println!("{}", serde_json::json!({ "exported": false, "reason": "NO_DATA" }));
            }
        },
    }

    Ok(())
}
