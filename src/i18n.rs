// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持韩文（默认）和越南文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{KpiMetric, KpiStatus, ReportPeriod};

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["ko", "vi"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言（不支持的语言回退到 "ko"）
///
/// # 参数
/// - locale: 语言代码（"ko" 或 "vi"）
pub fn set_locale(locale: &str) {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        rust_i18n::set_locale("ko");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use cnc_kpi::i18n::t;
/// let msg = t("export.no_data");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use cnc_kpi::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/test.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// KPI 状态标签
pub fn status_label(status: KpiStatus) -> String {
    t(&format!("kpi.status.{}", status))
}

/// KPI 指标名称
pub fn metric_label(metric: KpiMetric) -> String {
    t(&format!("kpi.metric.{}", metric))
}

/// 报表周期名称
pub fn period_label(period: ReportPeriod) -> String {
    t(&format!("kpi.period.{}", period))
}
