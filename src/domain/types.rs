// ==========================================
// CNC 生产 KPI 看板 - 领域类型定义
// ==========================================
// 报表周期 / 周起始日 / KPI 指标与状态
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 报表周期 (Report Period)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,   // 日报
    Weekly,  // 周报
    Monthly, // 月报
    Yearly,  // 年报
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::Daily => write!(f, "daily"),
            ReportPeriod::Weekly => write!(f, "weekly"),
            ReportPeriod::Monthly => write!(f, "monthly"),
            ReportPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(ReportPeriod::Daily),
            "weekly" | "week" => Ok(ReportPeriod::Weekly),
            "monthly" | "month" => Ok(ReportPeriod::Monthly),
            "yearly" | "year" => Ok(ReportPeriod::Yearly),
            other => Err(format!("未知报表周期: {}", other)),
        }
    }
}

// ==========================================
// 周起始日 (Week Start)
// ==========================================
// 默认周日起始，与看板日期控件一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!("未知周起始日: {}", other)),
        }
    }
}

// ==========================================
// 日期区间 (闭区间)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 单日区间
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

// ==========================================
// KPI 指标 (KPI Metric)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiMetric {
    Achievement, // 目标达成率
    Defect,      // 不良率
    Efficiency,  // 作业效率
}

impl fmt::Display for KpiMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiMetric::Achievement => write!(f, "achievement"),
            KpiMetric::Defect => write!(f, "defect"),
            KpiMetric::Efficiency => write!(f, "efficiency"),
        }
    }
}

// ==========================================
// KPI 状态 (KPI Status)
// ==========================================
// 三级: 良好 / 注意 / 警告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Success,
    Warning,
    Error,
}

impl fmt::Display for KpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiStatus::Success => write!(f, "success"),
            KpiStatus::Warning => write!(f, "warning"),
            KpiStatus::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_period_parse() {
        assert_eq!("daily".parse::<ReportPeriod>(), Ok(ReportPeriod::Daily));
        assert_eq!(" Week ".parse::<ReportPeriod>(), Ok(ReportPeriod::Weekly));
        assert!("quarterly".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&KpiStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
