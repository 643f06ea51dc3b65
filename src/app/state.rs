// ==========================================
// CNC 生产 KPI 看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DataSyncApi, MasterDataApi, ProductionApi, ReportApi};
use crate::config::config_manager::ConfigManager;
use crate::config::ReportConfigReader;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::{ModelRepository, ProductionRepository, WorkerRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CNC_KPI_DB_PATH";

const DB_FILE_NAME: &str = "cnc_kpi.db";

/// 应用状态
///
/// 所有仓储共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 报表API
    pub report_api: Arc<ReportApi>,

    /// 生产实绩API
    pub production_api: Arc<ProductionApi>,

    /// 主数据API
    pub master_data_api: Arc<MasterDataApi>,

    /// 数据同步API
    pub data_sync_api: Arc<DataSyncApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（":memory:" 为内存库）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库结构初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let production_repo = Arc::new(ProductionRepository::from_connection(conn.clone()));
        let worker_repo = Arc::new(WorkerRepository::from_connection(conn.clone()));
        let model_repo = Arc::new(ModelRepository::from_connection(conn.clone()));

        let config = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 创建API实例
        // ==========================================
        let report_config: Arc<dyn ReportConfigReader> = config.clone();
        let report_api = Arc::new(ReportApi::new(production_repo.clone(), report_config));
        let production_api = Arc::new(ProductionApi::new(production_repo.clone()));
        let master_data_api = Arc::new(MasterDataApi::new(
            worker_repo.clone(),
            model_repo.clone(),
            config.clone(),
        ));
        let data_sync_api = Arc::new(DataSyncApi::new(
            production_repo,
            worker_repo,
            model_repo,
            config.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config,
            report_api,
            production_api,
            master_data_api,
            data_sync_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 优先级
/// 1. 环境变量 CNC_KPI_DB_PATH
/// 2. 用户数据目录/cnc-kpi/cnc_kpi.db
/// 3. ./cnc_kpi.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("cnc-kpi");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
