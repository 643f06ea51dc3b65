// ==========================================
// CNC 生产 KPI 看板 - 生产实绩 API
// ==========================================
// 职责: 生产记录的录入、编辑、删除、查询
// 边界校验: 作业员/生产线/型号非空，数量不为负
// 说明: 不良数大于产量不拦截（按原值参与统计）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::production::{NewProductionRecord, ProductionFilter, ProductionRecord};
use crate::repository::ProductionRepository;
use std::sync::Arc;
use tracing::info;

pub struct ProductionApi {
    production_repo: Arc<ProductionRepository>,
}

impl ProductionApi {
    pub fn new(production_repo: Arc<ProductionRepository>) -> Self {
        Self { production_repo }
    }

    /// 录入一条生产记录
    pub fn create(&self, record: NewProductionRecord) -> ApiResult<ProductionRecord> {
        let record = normalize(record)?;
        let id = self.production_repo.insert(&record)?;
        info!(id = id, worker = %record.worker, date = %record.date, "生产记录已录入");
        Ok(record.with_id(id))
    }

    /// 修改生产记录（整条覆盖）
    pub fn update(&self, id: i64, record: NewProductionRecord) -> ApiResult<ProductionRecord> {
        let record = normalize(record)?;
        let updated = self.production_repo.update(id, &record)?;
        info!(id = id, "生产记录已修改");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.production_repo.delete(id)?;
        info!(id = id, "生产记录已删除");
        Ok(())
    }

    pub fn get(&self, id: i64) -> ApiResult<ProductionRecord> {
        self.production_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("生产记录(id={})不存在", id)))
    }

    /// 条件查询（日期降序）
    pub fn list(&self, filter: &ProductionFilter) -> ApiResult<Vec<ProductionRecord>> {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if start > end {
                return Err(ApiError::InvalidInput(format!(
                    "开始日期晚于结束日期: {} ~ {}",
                    start, end
                )));
            }
        }
        Ok(self.production_repo.find(filter)?)
    }
}

/// 校验并整理录入值（去除首尾空白，空备注视为无）
fn normalize(mut record: NewProductionRecord) -> ApiResult<NewProductionRecord> {
    record.worker = require_text("worker", &record.worker)?;
    record.line = require_text("line", &record.line)?;
    record.model = require_text("model", &record.model)?;

    for (field, value) in [
        ("target_quantity", record.target_quantity),
        ("produced_quantity", record.produced_quantity),
        ("defect_quantity", record.defect_quantity),
    ] {
        if value < 0 {
            return Err(ApiError::InvalidInput(format!("{} 不能为负数: {}", field, value)));
        }
    }

    record.note = record
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    Ok(record)
}

pub(crate) fn require_text(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} 不能为空", field)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_record() -> NewProductionRecord {
        NewProductionRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            worker: " Kim ".to_string(),
            line: "B-03".to_string(),
            model: "M-100".to_string(),
            target_quantity: 100,
            produced_quantity: 90,
            defect_quantity: 120,
            note: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_normalize_trims_and_accepts_defects_over_produced() {
        let record = normalize(new_record()).unwrap();
        assert_eq!(record.worker, "Kim");
        assert_eq!(record.note, None);
        assert_eq!(record.defect_quantity, 120);
    }

    #[test]
    fn test_normalize_rejects_blank_and_negative() {
        let mut blank = new_record();
        blank.line = "   ".to_string();
        assert!(matches!(normalize(blank), Err(ApiError::InvalidInput(_))));

        let mut negative = new_record();
        negative.target_quantity = -1;
        assert!(matches!(normalize(negative), Err(ApiError::InvalidInput(_))));
    }
}
