// ==========================================
// CNC 生产 KPI 看板 - 主数据 API
// ==========================================
// 职责: 作业员 / 型号的维护
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::production_api::require_text;
use crate::config::ConfigManager;
use crate::domain::master_data::{NewProductModel, NewWorker, ProductModel, Worker};
use crate::repository::{ModelRepository, WorkerRepository};
use std::sync::Arc;
use tracing::info;

pub struct MasterDataApi {
    worker_repo: Arc<WorkerRepository>,
    model_repo: Arc<ModelRepository>,
    config: Arc<ConfigManager>,
}

impl MasterDataApi {
    pub fn new(
        worker_repo: Arc<WorkerRepository>,
        model_repo: Arc<ModelRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            worker_repo,
            model_repo,
            config,
        }
    }

    // ==========================================
    // 作业员
    // ==========================================

    pub fn create_worker(&self, worker: NewWorker) -> ApiResult<Worker> {
        let worker = self.normalize_worker(worker)?;
        let created = self.worker_repo.insert(&worker)?;
        info!(id = created.id, employee_no = %created.employee_no, "作业员已登记");
        Ok(created)
    }

    pub fn update_worker(&self, id: i64, worker: NewWorker) -> ApiResult<Worker> {
        let worker = self.normalize_worker(worker)?;
        Ok(self.worker_repo.update(id, &worker)?)
    }

    pub fn delete_worker(&self, id: i64) -> ApiResult<()> {
        self.worker_repo.delete(id)?;
        info!(id = id, "作业员已删除");
        Ok(())
    }

    pub fn get_worker(&self, id: i64) -> ApiResult<Worker> {
        self.worker_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("作业员(id={})不存在", id)))
    }

    /// 全部作业员（按姓名升序）
    pub fn list_workers(&self) -> ApiResult<Vec<Worker>> {
        Ok(self.worker_repo.list_all()?)
    }

    // ==========================================
    // 型号
    // ==========================================

    pub fn create_model(&self, model: NewProductModel) -> ApiResult<ProductModel> {
        let model = normalize_model(model)?;
        let created = self.model_repo.insert(&model)?;
        info!(id = created.id, model = %created.model, "型号已登记");
        Ok(created)
    }

    pub fn update_model(&self, id: i64, model: NewProductModel) -> ApiResult<ProductModel> {
        let model = normalize_model(model)?;
        Ok(self.model_repo.update(id, &model)?)
    }

    pub fn delete_model(&self, id: i64) -> ApiResult<()> {
        self.model_repo.delete(id)?;
        info!(id = id, "型号已删除");
        Ok(())
    }

    /// 全部型号（按型号代码升序）
    pub fn list_models(&self) -> ApiResult<Vec<ProductModel>> {
        Ok(self.model_repo.list_all()?)
    }

    /// 工号/姓名/生产线必填；部门为空时取配置的默认部门
    fn normalize_worker(&self, worker: NewWorker) -> ApiResult<NewWorker> {
        let department = match worker.department.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => self
                .config
                .get_default_department()
                .map_err(|e| ApiError::ConfigError(e.to_string()))?,
        };

        Ok(NewWorker {
            employee_no: require_text("employee_no", &worker.employee_no)?,
            name: require_text("name", &worker.name)?,
            department: Some(department),
            line: require_text("line", &worker.line)?,
        })
    }
}

fn normalize_model(model: NewProductModel) -> ApiResult<NewProductModel> {
    Ok(NewProductModel {
        model: require_text("model", &model.model)?,
        process: model.process.trim().to_string(),
    })
}
