// ==========================================
// CNC 生产 KPI 看板 - 生产记录实体
// ==========================================
// 一条记录 = 一名作业员在某条线/某个型号上一个班次(日)的产出
// 数量字段允许异常值进入(负数/不良数大于产量)，校验在 API 边界完成
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 生产记录（已落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: i64,                   // 主键
    pub date: NaiveDate,           // 生产日期
    pub worker: String,            // 作业员姓名（分组键，精确匹配）
    pub line: String,              // 生产线编号（如 B-03）
    pub model: String,             // 型号/批次代码
    pub target_quantity: i64,      // 目标数量
    pub produced_quantity: i64,    // 生产数量
    pub defect_quantity: i64,      // 不良数量
    pub note: Option<String>,      // 备注
}

// ==========================================
// NewProductionRecord - 待写入的生产记录
// ==========================================
// 用途: 手工录入 / 编辑 / 表格导入
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewProductionRecord {
    pub date: NaiveDate,
    pub worker: String,
    pub line: String,
    pub model: String,
    pub target_quantity: i64,
    pub produced_quantity: i64,
    pub defect_quantity: i64,
    pub note: Option<String>,
}

impl NewProductionRecord {
    /// 附加主键，得到完整记录
    pub fn with_id(self, id: i64) -> ProductionRecord {
        ProductionRecord {
            id,
            date: self.date,
            worker: self.worker,
            line: self.line,
            model: self.model,
            target_quantity: self.target_quantity,
            produced_quantity: self.produced_quantity,
            defect_quantity: self.defect_quantity,
            note: self.note,
        }
    }
}

// ==========================================
// ProductionFilter - 查询条件
// ==========================================
// 每个 Some 字段追加一个条件；日期为闭区间
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub worker: Option<String>,
    pub line: Option<String>,
    pub model: Option<String>,
}

impl ProductionFilter {
    /// 按日期区间过滤
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
