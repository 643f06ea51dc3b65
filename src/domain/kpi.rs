// ==========================================
// CNC 生产 KPI 看板 - KPI 值对象
// ==========================================
// 每次查询实时计算，不落库
// ==========================================

use crate::domain::types::KpiStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// KpiSummary - 汇总 KPI
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_target: i64,
    pub total_produced: i64,
    pub total_defects: i64,
    pub achievement_rate: f64, // 1 位小数
    pub defect_rate: f64,      // 2 位小数
    pub efficiency_rate: f64,  // 1 位小数，不截断到 [0, 100]
}

// ==========================================
// GroupStats - 分组统计（按作业员 / 按生产线）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// 分组键（作业员姓名或生产线编号）
    pub key: String,
    /// 按作业员分组时为该作业员首条记录的生产线
    pub line: String,
    pub record_count: usize,
    #[serde(flatten)]
    pub summary: KpiSummary,
}

impl GroupStats {
    pub fn achievement_rate(&self) -> f64 {
        self.summary.achievement_rate
    }
}

// ==========================================
// KpiStatusSet - 三项指标状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiStatusSet {
    pub achievement: KpiStatus,
    pub defect: KpiStatus,
    pub efficiency: KpiStatus,
}
