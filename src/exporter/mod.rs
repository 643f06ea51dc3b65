// ==========================================
// CNC 生产 KPI 看板 - 导出层
// ==========================================
// 职责: 生产记录 / 统计 / 主数据 → CSV
// 列名沿用看板的韩文表头，可被导入器重新读取
// ==========================================

pub mod error;

pub use error::{ExportError, ExportResult};

use crate::domain::kpi::GroupStats;
use crate::domain::master_data::{ProductModel, Worker};
use crate::domain::production::ProductionRecord;
use csv::Writer;
use std::io::Write;

/// 生产记录导出表头
pub const PRODUCTION_HEADER: &[&str] = &[
    "날짜",
    "작업자",
    "라인번호",
    "모델차수",
    "목표수량",
    "생산수량",
    "불량수량",
    "달성률",
    "불량률",
    "특이사항",
];

/// 作业员统计导出表头
pub const GROUP_STATS_HEADER: &[&str] = &[
    "작업자",
    "라인번호",
    "목표수량",
    "생산수량",
    "불량수량",
    "달성률",
    "불량률",
    "작업효율",
];

pub const WORKER_HEADER: &[&str] = &["사번", "이름", "부서", "라인번호"];

pub const MODEL_HEADER: &[&str] = &["모델명", "공정"];

/// 单条记录的达成率文本（目标为 0 时输出 "0%"）
pub fn row_achievement_text(record: &ProductionRecord) -> String {
    if record.target_quantity > 0 {
        let rate = record.produced_quantity as f64 / record.target_quantity as f64 * 100.0;
        format!("{:.1}%", rate)
    } else {
        "0%".to_string()
    }
}

/// 单条记录的不良率文本（产量为 0 时输出 "0%"）
pub fn row_defect_text(record: &ProductionRecord) -> String {
    if record.produced_quantity > 0 {
        let rate = record.defect_quantity as f64 / record.produced_quantity as f64 * 100.0;
        format!("{:.2}%", rate)
    } else {
        "0%".to_string()
    }
}

/// 导出生产记录
///
/// # 返回
/// - Ok(usize): 写入的数据行数
/// - Err(ExportError::NoData): 记录为空，未写入任何内容
pub fn export_production_csv<W: Write>(
    records: &[ProductionRecord],
    writer: W,
) -> ExportResult<usize> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(PRODUCTION_HEADER)?;

    for record in records {
        wtr.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.worker.clone(),
            record.line.clone(),
            record.model.clone(),
            record.target_quantity.to_string(),
            record.produced_quantity.to_string(),
            record.defect_quantity.to_string(),
            row_achievement_text(record),
            row_defect_text(record),
            record.note.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// 导出分组统计（作业员统计 / 生产线统计）
pub fn export_group_stats_csv<W: Write>(stats: &[GroupStats], writer: W) -> ExportResult<usize> {
    if stats.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(GROUP_STATS_HEADER)?;

    for item in stats {
        let s = &item.summary;
        wtr.write_record([
            item.key.clone(),
            item.line.clone(),
            s.total_target.to_string(),
            s.total_produced.to_string(),
            s.total_defects.to_string(),
            format!("{:.1}%", s.achievement_rate),
            format!("{:.2}%", s.defect_rate),
            format!("{:.1}%", s.efficiency_rate),
        ])?;
    }

    wtr.flush()?;
    Ok(stats.len())
}

pub fn export_workers_csv<W: Write>(workers: &[Worker], writer: W) -> ExportResult<usize> {
    if workers.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(WORKER_HEADER)?;
    for w in workers {
        wtr.write_record([&w.employee_no, &w.name, &w.department, &w.line])?;
    }

    wtr.flush()?;
    Ok(workers.len())
}

pub fn export_models_csv<W: Write>(models: &[ProductModel], writer: W) -> ExportResult<usize> {
    if models.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(MODEL_HEADER)?;
    for m in models {
        wtr.write_record([&m.model, &m.process])?;
    }

    wtr.flush()?;
    Ok(models.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::KpiSummary;
    use chrono::NaiveDate;

    fn record(target: i64, produced: i64, defects: i64) -> ProductionRecord {
        ProductionRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            worker: "Kim".to_string(),
            line: "B-03".to_string(),
            model: "M-100".to_string(),
            target_quantity: target,
            produced_quantity: produced,
            defect_quantity: defects,
            note: None,
        }
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_export_production_rows() {
        let mut buf = Vec::new();
        let written = export_production_csv(&[record(100, 97, 2), record(0, 0, 0)], &mut buf).unwrap();
        assert_eq!(written, 2);

        let text = to_string(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], PRODUCTION_HEADER.join(","));
        assert_eq!(lines[1], "2024-05-01,Kim,B-03,M-100,100,97,2,97.0%,2.06%,");
        assert_eq!(lines[2], "2024-05-01,Kim,B-03,M-100,0,0,0,0%,0%,");
    }

    #[test]
    fn test_export_empty_set_is_no_data() {
        let mut buf = Vec::new();
        assert!(matches!(export_production_csv(&[], &mut buf), Err(ExportError::NoData)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_export_group_stats_formats_rates() {
        let stats = vec![GroupStats {
            key: "Kim".to_string(),
            line: "B-03".to_string(),
            record_count: 1,
            summary: KpiSummary {
                total_target: 50,
                total_produced: 80,
                total_defects: 104,
                achievement_rate: 160.0,
                defect_rate: 130.0,
                efficiency_rate: -30.0,
            },
        }];
        let mut buf = Vec::new();
        export_group_stats_csv(&stats, &mut buf).unwrap();
        let text = to_string(buf);
        assert!(text.contains("Kim,B-03,50,80,104,160.0%,130.00%,-30.0%"));
    }

    #[test]
    fn test_export_master_data() {
        let workers = vec![Worker {
            id: 1,
            employee_no: "E001".to_string(),
            name: "Kim".to_string(),
            department: "CNC".to_string(),
            line: "B-03".to_string(),
        }];
        let mut buf = Vec::new();
        export_workers_csv(&workers, &mut buf).unwrap();
        assert_eq!(to_string(buf), "사번,이름,부서,라인번호\nE001,Kim,CNC,B-03\n");

        let mut buf = Vec::new();
        assert!(matches!(export_models_csv(&[], &mut buf), Err(ExportError::NoData)));
    }
}
