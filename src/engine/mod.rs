// ==========================================
// CNC 生产 KPI 看板 - 引擎层
// ==========================================
// 职责: KPI 聚合、状态判定、报表周期计算
// 红线: 纯计算，不做 I/O，不持有状态
// ==========================================

pub mod kpi;
pub mod period;
pub mod status;

// 重导出核心引擎
pub use kpi::{round_to, KpiEngine, DEFAULT_TOP_PERFORMER_COUNT};
pub use period::{date_range, export_file_stem, range_file_stem, retention_cutoff};
pub use status::{
    classify, KpiTargets, ACHIEVEMENT_TARGET, DEFECT_TARGET, EFFICIENCY_TARGET,
};
