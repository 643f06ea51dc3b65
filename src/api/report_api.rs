// ==========================================
// CNC 生产 KPI 看板 - 报表 API
// ==========================================
// 职责: 查询区间内的生产记录并交给 KpiEngine 聚合
// 覆盖: 日报 / 周报 / 月报 / 年报 / 看板（任意区间）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfigReader;
use crate::domain::kpi::{GroupStats, KpiStatusSet, KpiSummary};
use crate::domain::production::{ProductionFilter, ProductionRecord};
use crate::domain::types::{DateRange, ReportPeriod};
use crate::engine::kpi::KpiEngine;
use crate::engine::period::{date_range, export_file_stem, range_file_stem};
use crate::exporter::export_production_csv;
use crate::repository::{ProductionRepository, RecordOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 看板导出文件名前缀
const DASHBOARD_FILE_PREFIX: &str = "dashboard";

// ==========================================
// KpiReport - 报表结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    /// 报表周期（看板任意区间时为 None）
    pub period: Option<ReportPeriod>,
    pub range: DateRange,
    pub summary: KpiSummary,
    pub status: KpiStatusSet,
    /// 作业员统计（达成率降序）
    pub worker_stats: Vec<GroupStats>,
    /// 生产线统计（生产线编号升序）
    pub line_stats: Vec<GroupStats>,
    pub best_performers: Vec<GroupStats>,
    pub record_count: usize,
    pub export_file_stem: String,
}

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    production_repo: Arc<ProductionRepository>,
    config: Arc<dyn ReportConfigReader>,
    engine: KpiEngine,
}

impl ReportApi {
    /// 创建新的 ReportApi 实例
    ///
    /// # 参数
    /// - production_repo: 生产记录仓储
    /// - config: 报表配置读取器（周起始日、最佳作业员数量）
    pub fn new(
        production_repo: Arc<ProductionRepository>,
        config: Arc<dyn ReportConfigReader>,
    ) -> Self {
        Self {
            production_repo,
            config,
            engine: KpiEngine::new(),
        }
    }

    /// 周期报表
    ///
    /// # 参数
    /// - period: 日/周/月/年
    /// - anchor: 选定日期，报表覆盖其所在的周期
    pub fn get_report(&self, period: ReportPeriod, anchor: NaiveDate) -> ApiResult<KpiReport> {
        let week_start = self
            .config
            .get_week_start()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let range = date_range(period, anchor, week_start);

        self.build_report(Some(period), range, export_file_stem(period, &range))
    }

    /// 看板（任意日期区间，闭区间）
    pub fn get_dashboard(&self, range: DateRange) -> ApiResult<KpiReport> {
        validate_range(&range)?;
        self.build_report(None, range, range_file_stem(DASHBOARD_FILE_PREFIX, &range))
    }

    /// 导出周期报表的生产实绩（逐行带达成率/不良率）
    ///
    /// # 返回
    /// - Ok(PathBuf): 写入的文件路径（`<dir>/<export_file_stem>.csv`）
    /// - Err(ApiError::NoData): 区间内没有记录，不创建文件
    pub fn export_report(
        &self,
        period: ReportPeriod,
        anchor: NaiveDate,
        dir: &Path,
    ) -> ApiResult<PathBuf> {
        let week_start = self
            .config
            .get_week_start()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let range = date_range(period, anchor, week_start);

        self.export_records(range, &export_file_stem(period, &range), dir)
    }

    /// 导出看板区间的生产实绩（`<dir>/dashboard_YYYYMMDD_YYYYMMDD.csv`）
    pub fn export_dashboard(&self, range: DateRange, dir: &Path) -> ApiResult<PathBuf> {
        validate_range(&range)?;
        self.export_records(range, &range_file_stem(DASHBOARD_FILE_PREFIX, &range), dir)
    }

    fn export_records(&self, range: DateRange, stem: &str, dir: &Path) -> ApiResult<PathBuf> {
        let records = self.load_records(&range)?;
        if records.is_empty() {
            return Err(ApiError::NoData);
        }

        let path = dir.join(format!("{}.csv", stem));
        let file = File::create(&path)
            .map_err(|e| ApiError::ExportError(format!("{}: {}", path.display(), e)))?;
        let rows = export_production_csv(&records, file)?;

        info!(path = %path.display(), rows = rows, range = %range, "报表导出完成");
        Ok(path)
    }

    // 按写入顺序取数，分组的“首次出现”顺序依赖于此
    fn load_records(&self, range: &DateRange) -> ApiResult<Vec<ProductionRecord>> {
        Ok(self.production_repo.find_ordered(
            &ProductionFilter::between(range.start, range.end),
            RecordOrder::Insertion,
        )?)
    }

    fn build_report(
        &self,
        period: Option<ReportPeriod>,
        range: DateRange,
        export_file_stem: String,
    ) -> ApiResult<KpiReport> {
        let top_n = self
            .config
            .get_top_performer_count()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let records = self.load_records(&range)?;

        let summary = self.engine.compute_summary(&records);
        let worker_stats = self.engine.worker_stats(&records);
        let line_stats = self.engine.line_stats(&records);
        let best_performers = self.engine.top_performers(&worker_stats, top_n);

        info!(
            period = ?period,
            range = %range,
            record_count = records.len(),
            workers = worker_stats.len(),
            "报表生成完成"
        );

        Ok(KpiReport {
            period,
            range,
            status: self.engine.status_of(&summary),
            summary,
            worker_stats,
            line_stats,
            best_performers,
            record_count: records.len(),
            export_file_stem,
        })
    }
}

fn validate_range(range: &DateRange) -> ApiResult<()> {
    if range.start > range.end {
        return Err(ApiError::InvalidInput(format!(
            "开始日期晚于结束日期: {}",
            range
        )));
    }
    Ok(())
}
