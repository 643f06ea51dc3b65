// ==========================================
// CNC 生产 KPI 看板 - 命令行入口
// ==========================================
// 用法: cnc-kpi [daily|weekly|monthly|yearly] [YYYY-MM-DD]
// 输出: 所选周期的报表 JSON（stdout）
// ==========================================

use chrono::{Local, NaiveDate};
use cnc_kpi::app::{get_default_db_path, AppState};
use cnc_kpi::ReportPeriod;
use std::process::ExitCode;

fn main() -> ExitCode {
    cnc_kpi::logging::init();

    match run(std::env::args().skip(1).collect()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<String, String> {
    let period = match args.first() {
        Some(p) => p.parse::<ReportPeriod>()?,
        None => ReportPeriod::Monthly,
    };
    let anchor = match args.get(1) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|e| format!("日期格式错误 (期望 YYYY-MM-DD): {} ({})", d, e))?,
        None => Local::now().date_naive(),
    };

    tracing::info!("{} v{}", cnc_kpi::APP_NAME, cnc_kpi::VERSION);

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let state = AppState::new(db_path)?;

    let report = state
        .report_api
        .get_report(period, anchor)
        .map_err(|e| e.user_message())?;

    serde_json::to_string_pretty(&report).map_err(|e| e.to_string())
}
