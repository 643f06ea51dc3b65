// ==========================================
// CNC 生产 KPI 看板 - 报表周期计算
// ==========================================
// 职责: 由选定日期计算日/周/月/年的查询区间
// 说明: 仅做日期运算，不参与 KPI 聚合
// ==========================================

use crate::domain::types::{DateRange, ReportPeriod, WeekStart};
use chrono::{Datelike, Days, Months, NaiveDate};

/// 计算报表查询区间（闭区间）
///
/// # 规则
/// - Daily:   当天
/// - Weekly:  所在周（默认周日起始，共 7 天）
/// - Monthly: 所在自然月
/// - Yearly:  所在自然年
pub fn date_range(period: ReportPeriod, anchor: NaiveDate, week_start: WeekStart) -> DateRange {
    match period {
        ReportPeriod::Daily => DateRange::single_day(anchor),
        ReportPeriod::Weekly => week_range(anchor, week_start),
        ReportPeriod::Monthly => month_range(anchor),
        ReportPeriod::Yearly => year_range(anchor),
    }
}

/// 所在周区间
pub fn week_range(anchor: NaiveDate, week_start: WeekStart) -> DateRange {
    let offset = match week_start {
        WeekStart::Sunday => anchor.weekday().num_days_from_sunday(),
        WeekStart::Monday => anchor.weekday().num_days_from_monday(),
    };
    let start = anchor
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    DateRange::new(start, end)
}

/// 所在自然月区间
pub fn month_range(anchor: NaiveDate) -> DateRange {
    // 每月 1 日总是合法日期
    let start = anchor.with_day(1).unwrap_or(anchor);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    DateRange::new(start, end)
}

/// 所在自然年区间
pub fn year_range(anchor: NaiveDate) -> DateRange {
    let year = anchor.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(anchor);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(anchor);
    DateRange::new(start, end)
}

/// 数据保留截止日: today 往前推 N 个自然月（月末自动收敛）
///
/// 早于截止日（不含）的记录视为过期。
pub fn retention_cutoff(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// 报表导出文件名（不含扩展名）
pub fn export_file_stem(period: ReportPeriod, range: &DateRange) -> String {
    match period {
        ReportPeriod::Daily => format!("daily_report_{}", range.start.format("%Y%m%d")),
        ReportPeriod::Weekly => format!(
            "weekly_report_{}_{}",
            range.start.format("%Y%m%d"),
            range.end.format("%Y%m%d")
        ),
        ReportPeriod::Monthly => format!("monthly_report_{}", range.start.format("%Y%m")),
        ReportPeriod::Yearly => format!("yearly_report_{}", range.start.format("%Y")),
    }
}

/// 任意区间导出文件名（看板/数据同步页）
pub fn range_file_stem(prefix: &str, range: &DateRange) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        range.start.format("%Y%m%d"),
        range.end.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_range() {
        let r = date_range(ReportPeriod::Daily, d(2024, 5, 15), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2024, 5, 15), d(2024, 5, 15)));
    }

    #[test]
    fn test_weekly_range_sunday_start() {
        // 2024-05-15 是周三
        let r = date_range(ReportPeriod::Weekly, d(2024, 5, 15), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2024, 5, 12), d(2024, 5, 18)));

        // 周日当天即为起点
        let r = date_range(ReportPeriod::Weekly, d(2024, 5, 12), WeekStart::Sunday);
        assert_eq!(r.start, d(2024, 5, 12));

        // 周六为终点
        let r = date_range(ReportPeriod::Weekly, d(2024, 5, 18), WeekStart::Sunday);
        assert_eq!(r.start, d(2024, 5, 12));
    }

    #[test]
    fn test_weekly_range_monday_start() {
        let r = date_range(ReportPeriod::Weekly, d(2024, 5, 12), WeekStart::Monday);
        assert_eq!(r, DateRange::new(d(2024, 5, 6), d(2024, 5, 12)));
    }

    #[test]
    fn test_weekly_range_crosses_year() {
        // 2025-01-01 是周三
        let r = date_range(ReportPeriod::Weekly, d(2025, 1, 1), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2024, 12, 29), d(2025, 1, 4)));
    }

    #[test]
    fn test_monthly_range_handles_leap_february() {
        let r = date_range(ReportPeriod::Monthly, d(2024, 2, 10), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2024, 2, 1), d(2024, 2, 29)));

        let r = date_range(ReportPeriod::Monthly, d(2023, 12, 31), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2023, 12, 1), d(2023, 12, 31)));
    }

    #[test]
    fn test_yearly_range() {
        let r = date_range(ReportPeriod::Yearly, d(2024, 7, 4), WeekStart::Sunday);
        assert_eq!(r, DateRange::new(d(2024, 1, 1), d(2024, 12, 31)));
    }

    #[test]
    fn test_retention_cutoff_clamps_month_end() {
        assert_eq!(retention_cutoff(d(2024, 5, 31), 3), d(2024, 2, 29));
        assert_eq!(retention_cutoff(d(2024, 5, 15), 12), d(2023, 5, 15));
    }

    #[test]
    fn test_export_file_stems() {
        let week = DateRange::new(d(2024, 5, 12), d(2024, 5, 18));
        assert_eq!(
            export_file_stem(ReportPeriod::Weekly, &week),
            "weekly_report_20240512_20240518"
        );
        let month = month_range(d(2024, 5, 3));
        assert_eq!(export_file_stem(ReportPeriod::Monthly, &month), "monthly_report_202405");
        assert_eq!(range_file_stem("dashboard", &month), "dashboard_20240501_20240531");
    }
}
