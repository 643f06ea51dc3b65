// ==========================================
// CNC 生产 KPI 看板 - 生产记录导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到数据库
// 流程: 解析 → 映射 → 逐行落库
// ==========================================

use crate::domain::import::{ImportRowFailure, ImportSummary};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::ProductionFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser, ProductionImporter};
use crate::repository::ProductionRepository;
use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductionImporterImpl - 生产记录导入器实现
// ==========================================
pub struct ProductionImporterImpl {
    // 数据访问层
    production_repo: Arc<ProductionRepository>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl ProductionImporterImpl {
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - production_repo: 生产记录仓储
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(
        production_repo: Arc<ProductionRepository>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            production_repo,
            file_parser,
            field_mapper,
        }
    }

    /// 使用默认组件（按扩展名解析 + 韩/英表头映射）
    pub fn with_defaults(production_repo: Arc<ProductionRepository>) -> Self {
        Self::new(
            production_repo,
            Box::new(UniversalFileParser),
            Box::new(ProductionFieldMapper),
        )
    }
}

#[async_trait]
impl ProductionImporter for ProductionImporterImpl {
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        info!(batch_id = %batch_id, file_path = %file_path.display(), "开始导入生产记录");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let raw_rows = self.file_parser.parse_to_raw_records(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;

        let total_rows = raw_rows.len();
        info!(total_rows = total_rows, "文件解析完成");

        // === 步骤 2/3: 字段映射 + 逐行落库 ===
        // 单行失败只计数，不中断整批
        let mut success = 0usize;
        let mut failures = Vec::new();
        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            let outcome = self
                .field_mapper
                .map_to_production(row, row_number)
                .and_then(|record| {
                    self.production_repo
                        .insert(&record)
                        .map_err(ImportError::from)
                });

            match outcome {
                Ok(_) => success += 1,
                Err(e) => {
                    warn!(row_number = row_number, error = %e, "行导入失败");
                    failures.push(ImportRowFailure {
                        row_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            success = success,
            failed = failures.len(),
            elapsed_ms = elapsed_ms,
            "生产记录导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            file_name,
            total_rows,
            success,
            failed: failures.len(),
            failures,
            elapsed_ms,
        })
    }

    async fn batch_import(&self, file_paths: Vec<PathBuf>) -> Vec<ImportResult<ImportSummary>> {
        info!(file_count = file_paths.len(), "开始批量导入");
        let tasks = file_paths.iter().map(|path| self.import_file(path));
        join_all(tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;
    use crate::domain::production::ProductionFilter;
    use rusqlite::Connection;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::Builder;

    fn setup_importer() -> (ProductionImporterImpl, Arc<ProductionRepository>) {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let repo = Arc::new(ProductionRepository::from_connection(Arc::new(Mutex::new(conn))));
        (ProductionImporterImpl::with_defaults(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_import_counts_failed_rows_and_continues() {
        let (importer, repo) = setup_importer();

        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "날짜,작업자,라인번호,모델차수,목표수량,생산수량,불량수량,특이사항").unwrap();
        writeln!(temp_file, "2024-05-01,Kim,B-03,M-100,100,97,2,").unwrap();
        writeln!(temp_file, "bad-date,Lee,B-04,M-200,100,90,1,").unwrap();
        writeln!(temp_file, "2024-05-01,Park,B-04,M-200,80,,0,야간").unwrap();

        let summary = importer.import_file(temp_file.path()).await.unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].row_number, 2);
        assert!(!summary.batch_id.is_empty());

        let stored = repo.find(&ProductionFilter::default()).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_error() {
        let (importer, _) = setup_importer();
        let result = importer.import_file(Path::new("missing.csv")).await;
        assert!(result.is_err());
    }
}
