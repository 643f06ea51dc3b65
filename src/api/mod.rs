// ==========================================
// CNC 生产 KPI 看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行/上层界面调用
// ==========================================

pub mod data_sync_api;
pub mod error;
pub mod master_data_api;
pub mod production_api;
pub mod report_api;

// 重导出核心类型
pub use data_sync_api::{DataSyncApi, DatabaseStats, PurgeOutcome};
pub use error::{ApiError, ApiResult};
pub use master_data_api::MasterDataApi;
pub use production_api::ProductionApi;
pub use report_api::{KpiReport, ReportApi};
