// ==========================================
// CNC 生产 KPI 看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: CNC 作业员生产实绩录入与 KPI 报表
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - KPI 聚合与报表周期
pub mod engine;

// 导入层 - 表格文件
pub mod importer;

// 导出层 - CSV
pub mod exporter;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DateRange, KpiMetric, KpiStatus, ReportPeriod, WeekStart};

// 领域实体
pub use domain::{
    GroupStats, ImportSummary, KpiStatusSet, KpiSummary, NewProductionRecord, ProductionRecord,
};

// 引擎
pub use engine::{KpiEngine, KpiTargets};

// API
pub use api::{ApiError, DataSyncApi, KpiReport, MasterDataApi, ProductionApi, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CNC 생산 KPI";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
