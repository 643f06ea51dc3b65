// ==========================================
// CNC 生产 KPI 看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 说明: KPI 目标值为编译期常量，不在此处配置
// ==========================================

use crate::config::report_config_trait::ReportConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::master_data::DEFAULT_DEPARTMENT;
use crate::domain::types::WeekStart;
use crate::engine::kpi::DEFAULT_TOP_PERFORMER_COUNT;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认可选的历史数据清理月数
pub const DEFAULT_RETENTION_MONTH_OPTIONS: [u32; 3] = [3, 6, 12];

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(key = %key, value = %value, "配置已更新");
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 获取作业员默认部门
    pub fn get_default_department(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::DEFAULT_DEPARTMENT, DEFAULT_DEPARTMENT)
    }
}

impl ReportConfigReader for ConfigManager {
    fn get_week_start(&self) -> Result<WeekStart, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::WEEK_START, "sunday")?;
        Ok(value.parse::<WeekStart>()?)
    }

    fn get_top_performer_count(&self) -> Result<usize, Box<dyn Error>> {
        match self.get_config_value(config_keys::TOP_PERFORMER_COUNT)? {
            Some(v) => Ok(v.trim().parse::<usize>()?),
            None => Ok(DEFAULT_TOP_PERFORMER_COUNT),
        }
    }

    fn get_retention_month_options(&self) -> Result<Vec<u32>, Box<dyn Error>> {
        // 配置格式为 JSON 数组: [3, 6, 12]
        match self.get_config_value(config_keys::RETENTION_MONTH_OPTIONS)? {
            Some(v) => Ok(serde_json::from_str::<Vec<u32>>(&v)?),
            None => Ok(DEFAULT_RETENTION_MONTH_OPTIONS.to_vec()),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 报表
    pub const WEEK_START: &str = "week_start";
    pub const TOP_PERFORMER_COUNT: &str = "top_performer_count";

    // 数据同步
    pub const RETENTION_MONTH_OPTIONS: &str = "retention_month_options";

    // 主数据
    pub const DEFAULT_DEPARTMENT: &str = "default_department";
}
