// ==========================================
// CNC 生产 KPI 看板 - 报表配置读取 Trait
// ==========================================
// 职责: 定义报表/数据同步所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::WeekStart;
use std::error::Error;

// ==========================================
// ReportConfigReader Trait
// ==========================================
// 用途: 报表层所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ReportConfigReader: Send + Sync {
    /// 获取周起始日
    ///
    /// # 默认值
    /// - SUNDAY
    fn get_week_start(&self) -> Result<WeekStart, Box<dyn Error>>;

    /// 获取最佳作业员展示数量
    ///
    /// # 默认值
    /// - 3
    fn get_top_performer_count(&self) -> Result<usize, Box<dyn Error>>;

    /// 获取允许的历史数据清理月数
    ///
    /// # 默认值
    /// - [3, 6, 12]
    fn get_retention_month_options(&self) -> Result<Vec<u32>, Box<dyn Error>>;
}
