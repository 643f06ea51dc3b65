// ==========================================
// CNC 生产 KPI 看板 - 导入层
// ==========================================
// 职责: 表格文件 → 生产记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod production_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{parse_date_text, ProductionFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use production_importer::ProductionImporterImpl;

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, FileParser, ProductionImporter, RawRow};
