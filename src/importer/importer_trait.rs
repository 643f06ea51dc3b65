// ==========================================
// CNC 生产 KPI 看板 - 生产记录导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 逐行落库
// ==========================================

use crate::domain::import::ImportSummary;
use crate::domain::production::NewProductionRecord;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 原始行记录（列名 → 单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// ProductionImporter Trait
// ==========================================
// 用途: 生产记录导入主接口
// 实现者: ProductionImporterImpl
#[async_trait]
pub trait ProductionImporter: Send + Sync {
    /// 从表格文件导入生产记录（.xlsx/.xls/.csv）
    ///
    /// # 返回
    /// - Ok(ImportSummary): 成功/失败行统计
    /// - Err: 文件无法读取或解析
    ///
    /// # 说明
    /// - 单行映射或写入失败只计入 failed，不中断整批
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportSummary>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入互相独立，某个文件失败不影响其他文件
    async fn batch_import(&self, file_paths: Vec<PathBuf>) -> Vec<ImportResult<ImportSummary>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（首行为表头，空白行跳过）
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 2）
// 实现者: ProductionFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为待写入的生产记录
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 行号（用于错误定位）
    fn map_to_production(&self, row: &RawRow, row_number: usize) -> ImportResult<NewProductionRecord>;
}
