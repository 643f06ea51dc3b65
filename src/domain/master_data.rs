// ==========================================
// CNC 生产 KPI 看板 - 主数据实体
// ==========================================
// 作业员 (Workers) / 型号 (Model)
// ==========================================

use serde::{Deserialize, Serialize};

/// 作业员默认部门
pub const DEFAULT_DEPARTMENT: &str = "CNC";

// ==========================================
// Worker - 作业员
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub employee_no: String, // 工号
    pub name: String,        // 姓名
    pub department: String,  // 部门
    pub line: String,        // 所属生产线
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorker {
    pub employee_no: String,
    pub name: String,
    pub department: Option<String>,
    pub line: String,
}

impl NewWorker {
    /// 部门为空时回退为 CNC
    pub fn department_or_default(&self) -> String {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DEPARTMENT)
            .to_string()
    }
}

// ==========================================
// ProductModel - 型号
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    pub id: i64,
    pub model: String,   // 型号代码
    pub process: String, // 工序
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductModel {
    pub model: String,
    pub process: String,
}
