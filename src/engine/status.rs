// ==========================================
// CNC 生产 KPI 看板 - KPI 状态判定
// ==========================================
// 三级判定: success / warning / error
// 阈值固定（编译期常量），不支持运行期修改
// ==========================================

use crate::domain::kpi::{KpiStatusSet, KpiSummary};
use crate::domain::types::{KpiMetric, KpiStatus};
use serde::{Deserialize, Serialize};

/// 目标达成率目标值（%）
pub const ACHIEVEMENT_TARGET: f64 = 96.0;
/// 不良率上限（%）
pub const DEFECT_TARGET: f64 = 2.0;
/// 作业效率目标值（%）
pub const EFFICIENCY_TARGET: f64 = 95.0;

/// 达成率/效率的注意区间宽度（低于目标 5 个百分点以内）
pub const ACHIEVEMENT_WARNING_BAND: f64 = 5.0;
pub const EFFICIENCY_WARNING_BAND: f64 = 5.0;
/// 不良率的注意区间宽度（高于上限 1 个百分点以内）
pub const DEFECT_WARNING_BAND: f64 = 1.0;

// ==========================================
// KpiTargets - KPI 目标值集合
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiTargets {
    pub achievement: f64,
    pub defect: f64,
    pub efficiency: f64,
}

impl KpiTargets {
    /// 现场标准目标
    pub const STANDARD: KpiTargets = KpiTargets {
        achievement: ACHIEVEMENT_TARGET,
        defect: DEFECT_TARGET,
        efficiency: EFFICIENCY_TARGET,
    };

    /// 指定指标的目标值（用于渲染 "目标: 96%" 标签）
    pub fn target_for(&self, metric: KpiMetric) -> f64 {
        match metric {
            KpiMetric::Achievement => self.achievement,
            KpiMetric::Defect => self.defect,
            KpiMetric::Efficiency => self.efficiency,
        }
    }

    /// 判定单项指标状态
    ///
    /// # 规则
    /// - 达成率: >= 目标 → success; >= 目标-5 → warning; 否则 error
    /// - 不良率: <= 上限 → success; <= 上限+1 → warning; 否则 error
    /// - 效率:   >= 目标 → success; >= 目标-5 → warning; 否则 error
    pub fn classify(&self, value: f64, metric: KpiMetric) -> KpiStatus {
        match metric {
            KpiMetric::Achievement => {
                higher_is_better(value, self.achievement, ACHIEVEMENT_WARNING_BAND)
            }
            KpiMetric::Efficiency => {
                higher_is_better(value, self.efficiency, EFFICIENCY_WARNING_BAND)
            }
            KpiMetric::Defect => {
                if value <= self.defect {
                    KpiStatus::Success
                } else if value <= self.defect + DEFECT_WARNING_BAND {
                    KpiStatus::Warning
                } else {
                    KpiStatus::Error
                }
            }
        }
    }

    /// 一次判定汇总中的三项指标
    pub fn classify_summary(&self, summary: &KpiSummary) -> KpiStatusSet {
        KpiStatusSet {
            achievement: self.classify(summary.achievement_rate, KpiMetric::Achievement),
            defect: self.classify(summary.defect_rate, KpiMetric::Defect),
            efficiency: self.classify(summary.efficiency_rate, KpiMetric::Efficiency),
        }
    }
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn higher_is_better(value: f64, target: f64, band: f64) -> KpiStatus {
    if value >= target {
        KpiStatus::Success
    } else if value >= target - band {
        KpiStatus::Warning
    } else {
        KpiStatus::Error
    }
}

/// 按标准目标判定
pub fn classify(value: f64, metric: KpiMetric) -> KpiStatus {
    KpiTargets::STANDARD.classify(value, metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_boundaries() {
        assert_eq!(classify(96.0, KpiMetric::Achievement), KpiStatus::Success);
        assert_eq!(classify(120.0, KpiMetric::Achievement), KpiStatus::Success);
        assert_eq!(classify(95.9, KpiMetric::Achievement), KpiStatus::Warning);
        assert_eq!(classify(91.0, KpiMetric::Achievement), KpiStatus::Warning);
        assert_eq!(classify(90.9, KpiMetric::Achievement), KpiStatus::Error);
    }

    #[test]
    fn test_defect_boundaries() {
        assert_eq!(classify(0.0, KpiMetric::Defect), KpiStatus::Success);
        assert_eq!(classify(2.0, KpiMetric::Defect), KpiStatus::Success);
        assert_eq!(classify(2.1, KpiMetric::Defect), KpiStatus::Warning);
        assert_eq!(classify(3.0, KpiMetric::Defect), KpiStatus::Warning);
        assert_eq!(classify(3.1, KpiMetric::Defect), KpiStatus::Error);
    }

    #[test]
    fn test_efficiency_boundaries() {
        assert_eq!(classify(95.0, KpiMetric::Efficiency), KpiStatus::Success);
        assert_eq!(classify(94.9, KpiMetric::Efficiency), KpiStatus::Warning);
        assert_eq!(classify(90.0, KpiMetric::Efficiency), KpiStatus::Warning);
        assert_eq!(classify(89.9, KpiMetric::Efficiency), KpiStatus::Error);
        assert_eq!(classify(-30.0, KpiMetric::Efficiency), KpiStatus::Error);
    }

    #[test]
    fn test_targets_exposed() {
        let targets = KpiTargets::default();
        assert_eq!(targets.target_for(KpiMetric::Achievement), 96.0);
        assert_eq!(targets.target_for(KpiMetric::Defect), 2.0);
        assert_eq!(targets.target_for(KpiMetric::Efficiency), 95.0);
    }

    #[test]
    fn test_classify_summary() {
        let summary = KpiSummary {
            total_target: 100,
            total_produced: 93,
            total_defects: 5,
            achievement_rate: 93.0,
            defect_rate: 5.38,
            efficiency_rate: 88.0,
        };
        let set = KpiTargets::STANDARD.classify_summary(&summary);
        assert_eq!(set.achievement, KpiStatus::Warning);
        assert_eq!(set.defect, KpiStatus::Error);
        assert_eq!(set.efficiency, KpiStatus::Error);
    }
}
