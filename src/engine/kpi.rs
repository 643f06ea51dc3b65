// ==========================================
// CNC 生产 KPI 看板 - KPI 聚合引擎
// ==========================================
// 输入: 已查询出的生产记录列表
// 输出: 汇总 KPI / 作业员统计 / 生产线统计 / 最佳作业员
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 红线: 任意输入都不失败（除零一律回退为 0）
// ==========================================

use crate::domain::kpi::{GroupStats, KpiStatusSet, KpiSummary};
use crate::domain::production::ProductionRecord;
use crate::engine::status::KpiTargets;
use std::collections::HashMap;

/// 最佳作业员默认数量
pub const DEFAULT_TOP_PERFORMER_COUNT: usize = 3;

// ==========================================
// KpiEngine - KPI 聚合引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiEngine;

impl KpiEngine {
    /// 创建新的 KPI 聚合引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 汇总计算
    // ==========================================

    /// 计算汇总 KPI
    ///
    /// # 公式
    /// - 达成率 = 生产数量 / 目标数量 × 100（1 位小数）
    /// - 不良率 = 不良数量 / 生产数量 × 100（2 位小数）
    /// - 效率   = (生产数量 - 不良数量) / 目标数量 × 100（1 位小数）
    ///
    /// 分母不大于 0 时对应比率为 0；效率可能为负或超过 100，保持原值。
    pub fn compute_summary(&self, records: &[ProductionRecord]) -> KpiSummary {
        summarize(records.iter())
    }

    // ==========================================
    // 分组统计
    // ==========================================

    /// 按分组键划分记录并逐组汇总
    ///
    /// # 说明
    /// - 键比较为精确字符串比较（不做大小写/空白归一）
    /// - 结果按分组首次出现的顺序排列
    /// - `line` 取该组第一条记录的生产线
    pub fn group_by<'a, K>(&self, records: &'a [ProductionRecord], key_fn: K) -> Vec<GroupStats>
    where
        K: Fn(&'a ProductionRecord) -> &'a str,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut groups: Vec<(&'a str, Vec<&'a ProductionRecord>)> = Vec::new();

        for record in records {
            let key = key_fn(record);
            match index.get(key) {
                Some(&pos) => groups[pos].1.push(record),
                None => {
                    index.insert(key, groups.len());
                    groups.push((key, vec![record]));
                }
            }
        }

        groups
            .into_iter()
            .map(|(key, items)| GroupStats {
                key: key.to_string(),
                line: items
                    .first()
                    .map(|r| r.line.clone())
                    .unwrap_or_default(),
                record_count: items.len(),
                summary: summarize(items.iter().copied()),
            })
            .collect()
    }

    /// 作业员统计（按达成率降序，同值保持首次出现顺序）
    pub fn worker_stats(&self, records: &[ProductionRecord]) -> Vec<GroupStats> {
        let mut stats = self.group_by(records, |r| r.worker.as_str());
        sort_by_achievement_desc(&mut stats);
        stats
    }

    /// 生产线统计（按生产线编号升序）
    pub fn line_stats(&self, records: &[ProductionRecord]) -> Vec<GroupStats> {
        let mut stats = self.group_by(records, |r| r.line.as_str());
        stats.sort_by(|a, b| a.line.cmp(&b.line));
        stats
    }

    /// 最佳作业员（前 n 名）
    ///
    /// 重新按达成率降序排序，不依赖输入顺序；不足 n 个时原样返回，不补位。
    pub fn top_performers(&self, stats: &[GroupStats], n: usize) -> Vec<GroupStats> {
        let mut ranked = stats.to_vec();
        sort_by_achievement_desc(&mut ranked);
        ranked.truncate(n);
        ranked
    }

    /// 按标准目标判定汇总状态
    pub fn status_of(&self, summary: &KpiSummary) -> KpiStatusSet {
        KpiTargets::STANDARD.classify_summary(summary)
    }
}

fn sort_by_achievement_desc(stats: &mut [GroupStats]) {
    // sort_by 为稳定排序
    stats.sort_by(|a, b| b.achievement_rate().total_cmp(&a.achievement_rate()));
}

fn summarize<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a ProductionRecord>,
{
    // i128 累加，任意 i64 输入都不会溢出
    let (target, produced, defects) =
        records
            .into_iter()
            .fold((0i128, 0i128, 0i128), |(t, p, d), r| {
                (
                    t + i128::from(r.target_quantity),
                    p + i128::from(r.produced_quantity),
                    d + i128::from(r.defect_quantity),
                )
            });

    let achievement_rate = ratio(produced, target);
    let defect_rate = ratio(defects, produced);
    let efficiency_rate = ratio(produced - defects, target);

    KpiSummary {
        total_target: saturate(target),
        total_produced: saturate(produced),
        total_defects: saturate(defects),
        achievement_rate: round_to(achievement_rate, 1),
        defect_rate: round_to(defect_rate, 2),
        efficiency_rate: round_to(efficiency_rate, 1),
    }
}

/// 百分比，分母不大于 0 时为 0
fn ratio(numerator: i128, denominator: i128) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64 * 100.0
    } else {
        0.0
    }
}

/// 合计超出 i64 范围时取边界值
fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// 四舍五入到指定小数位（half up: floor(x * 10^d + 0.5) / 10^d）
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}
