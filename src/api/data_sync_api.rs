// ==========================================
// CNC 生产 KPI 看板 - 数据同步 API
// ==========================================
// 职责: 表格导入 / CSV 导出 / 历史数据清理 / 数据库统计
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ReportConfigReader};
use crate::domain::import::ImportSummary;
use crate::domain::production::ProductionFilter;
use crate::domain::types::DateRange;
use crate::engine::period::{range_file_stem, retention_cutoff};
use crate::exporter::{
    export_models_csv, export_production_csv, export_workers_csv, ExportError, ExportResult,
};
use crate::importer::{ProductionImporter, ProductionImporterImpl};
use crate::repository::{ModelRepository, ProductionRepository, WorkerRepository};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// 数据库统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub workers: i64,
    pub models: i64,
    pub production_records: i64,
}

/// 历史数据清理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeOutcome {
    /// 截止日（早于此日期的记录被删除）
    pub cutoff: NaiveDate,
    pub deleted: usize,
}

pub struct DataSyncApi {
    production_repo: Arc<ProductionRepository>,
    worker_repo: Arc<WorkerRepository>,
    model_repo: Arc<ModelRepository>,
    config: Arc<ConfigManager>,
    importer: ProductionImporterImpl,
}

impl DataSyncApi {
    pub fn new(
        production_repo: Arc<ProductionRepository>,
        worker_repo: Arc<WorkerRepository>,
        model_repo: Arc<ModelRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        let importer = ProductionImporterImpl::with_defaults(production_repo.clone());
        Self {
            production_repo,
            worker_repo,
            model_repo,
            config,
            importer,
        }
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入生产实绩表格（.xlsx/.xls/.csv）
    pub async fn import_production(&self, file_path: &Path) -> ApiResult<ImportSummary> {
        let summary = self.importer.import_file(file_path).await?;
        if summary.failed > 0 {
            warn!(
                batch_id = %summary.batch_id,
                failed = summary.failed,
                "部分行导入失败"
            );
        }
        Ok(summary)
    }

    /// 批量导入多个文件，各文件结果独立返回
    pub async fn batch_import(&self, file_paths: Vec<PathBuf>) -> Vec<ApiResult<ImportSummary>> {
        self.importer
            .batch_import(file_paths)
            .await
            .into_iter()
            .map(|r| r.map_err(ApiError::from))
            .collect()
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出区间内的生产实绩（日期降序）
    ///
    /// # 返回
    /// - Ok(usize): 导出行数
    /// - Err(ApiError::NoData): 区间内无数据，不创建文件
    pub fn export_production(&self, range: DateRange, path: &Path) -> ApiResult<usize> {
        let records = self
            .production_repo
            .find(&ProductionFilter::between(range.start, range.end))?;
        if records.is_empty() {
            return Err(ApiError::NoData);
        }
        let rows = write_file(path, |file| export_production_csv(&records, file))?;
        info!(path = %path.display(), rows = rows, range = %range, "生产实绩导出完成");
        Ok(rows)
    }

    /// 导出到目录，文件名为 `production_YYYYMMDD_YYYYMMDD.csv`
    pub fn export_production_to_dir(&self, range: DateRange, dir: &Path) -> ApiResult<PathBuf> {
        let path = dir.join(format!("{}.csv", Self::production_file_stem(&range)));
        self.export_production(range, &path)?;
        Ok(path)
    }

    pub fn export_workers(&self, path: &Path) -> ApiResult<usize> {
        let workers = self.worker_repo.list_all()?;
        if workers.is_empty() {
            return Err(ApiError::NoData);
        }
        let rows = write_file(path, |file| export_workers_csv(&workers, file))?;
        info!(path = %path.display(), rows = rows, "作业员导出完成");
        Ok(rows)
    }

    pub fn export_models(&self, path: &Path) -> ApiResult<usize> {
        let models = self.model_repo.list_all()?;
        if models.is_empty() {
            return Err(ApiError::NoData);
        }
        let rows = write_file(path, |file| export_models_csv(&models, file))?;
        info!(path = %path.display(), rows = rows, "型号导出完成");
        Ok(rows)
    }

    /// 生产实绩导出文件名（不含扩展名）
    pub fn production_file_stem(range: &DateRange) -> String {
        range_file_stem("production", range)
    }

    // ==========================================
    // 历史数据清理
    // ==========================================

    /// 删除 today 往前 N 个月之前的生产记录
    ///
    /// # 参数
    /// - months: 必须是配置允许的清理月数之一（默认 3/6/12）
    /// - today: 基准日期
    pub fn delete_older_than(&self, months: u32, today: NaiveDate) -> ApiResult<PurgeOutcome> {
        let allowed = self
            .config
            .get_retention_month_options()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        if !allowed.contains(&months) {
            return Err(ApiError::InvalidInput(format!(
                "不支持的清理月数: {}（可选: {:?}）",
                months, allowed
            )));
        }

        let cutoff = retention_cutoff(today, months);
        let deleted = self.production_repo.delete_before(cutoff)?;
        info!(months = months, cutoff = %cutoff, deleted = deleted, "历史生产记录已清理");

        Ok(PurgeOutcome { cutoff, deleted })
    }

    // ==========================================
    // 统计
    // ==========================================

    pub fn database_stats(&self) -> ApiResult<DatabaseStats> {
        Ok(DatabaseStats {
            workers: self.worker_repo.count()?,
            models: self.model_repo.count()?,
            production_records: self.production_repo.count()?,
        })
    }
}

/// 创建文件并交给导出函数写入
fn write_file<F>(path: &Path, export: F) -> ExportResult<usize>
where
    F: FnOnce(File) -> ExportResult<usize>,
{
    let file = File::create(path).map_err(ExportError::from)?;
    export(file)
}
