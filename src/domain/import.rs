// ==========================================
// CNC 生产 KPI 看板 - 导入结果值对象
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ImportRowFailure - 单行导入失败
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRowFailure {
    pub row_number: usize, // 数据行号（表头之后从 1 开始）
    pub reason: String,
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
// 单行失败不阻断整批，失败行逐条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub total_rows: usize,
    pub success: usize,
    pub failed: usize,
    pub failures: Vec<ImportRowFailure>,
    pub elapsed_ms: u64,
}
