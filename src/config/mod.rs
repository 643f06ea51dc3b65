// ==========================================
// CNC 生产 KPI 看板 - 配置层
// ==========================================
// 职责: 运行配置管理（周起始日、排名数量、清理月数等）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod report_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_RETENTION_MONTH_OPTIONS};
pub use report_config_trait::ReportConfigReader;
