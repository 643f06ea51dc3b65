// ==========================================
// CNC 生产 KPI 看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、枚举类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod import;
pub mod kpi;
pub mod master_data;
pub mod production;
pub mod types;

// 重导出核心类型
pub use import::{ImportRowFailure, ImportSummary};
pub use kpi::{GroupStats, KpiStatusSet, KpiSummary};
pub use master_data::{NewProductModel, NewWorker, ProductModel, Worker, DEFAULT_DEPARTMENT};
pub use production::{NewProductionRecord, ProductionFilter, ProductionRecord};
pub use types::{DateRange, KpiMetric, KpiStatus, ReportPeriod, WeekStart};
