// ==========================================
// CNC 生产 KPI 看板 - 主数据仓储
// ==========================================
// 职责: workers / models 表的 CRUD
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::master_data::{NewProductModel, NewWorker, ProductModel, Worker};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// WorkerRepository - 作业员仓储
// ==========================================
pub struct WorkerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkerRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增作业员（工号唯一）
    pub fn insert(&self, worker: &NewWorker) -> RepositoryResult<Worker> {
        let conn = self.get_conn()?;
        let department = worker.department_or_default();
        conn.execute(
            "INSERT INTO workers (employee_no, name, department, line) VALUES (?1, ?2, ?3, ?4)",
            params![worker.employee_no, worker.name, department, worker.line],
        )?;
        Ok(Worker {
            id: conn.last_insert_rowid(),
            employee_no: worker.employee_no.clone(),
            name: worker.name.clone(),
            department,
            line: worker.line.clone(),
        })
    }

    pub fn update(&self, id: i64, worker: &NewWorker) -> RepositoryResult<Worker> {
        let conn = self.get_conn()?;
        let department = worker.department_or_default();
        let affected = conn.execute(
            "UPDATE workers SET employee_no = ?1, name = ?2, department = ?3, line = ?4 WHERE id = ?5",
            params![worker.employee_no, worker.name, department, worker.line, id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Worker", id));
        }
        Ok(Worker {
            id,
            employee_no: worker.employee_no.clone(),
            name: worker.name.clone(),
            department,
            line: worker.line.clone(),
        })
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM workers WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Worker", id));
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Worker>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT id, employee_no, name, department, line FROM workers WHERE id = ?1",
            params![id],
            map_worker,
        );
        match result {
            Ok(worker) => Ok(Some(worker)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 全部作业员（按姓名升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Worker>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, employee_no, name, department, line FROM workers ORDER BY name ASC, id ASC",
        )?;
        let rows = stmt.query_map([], map_worker)?;
        let mut workers = Vec::new();
        for row in rows {
            workers.push(row?);
        }
        Ok(workers)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM workers", [], |row| row.get(0))?)
    }
}

fn map_worker(row: &Row<'_>) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get(0)?,
        employee_no: row.get(1)?,
        name: row.get(2)?,
        department: row.get(3)?,
        line: row.get(4)?,
    })
}

// ==========================================
// ModelRepository - 型号仓储
// ==========================================
pub struct ModelRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ModelRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增型号（型号代码唯一）
    pub fn insert(&self, model: &NewProductModel) -> RepositoryResult<ProductModel> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO models (model, process) VALUES (?1, ?2)",
            params![model.model, model.process],
        )?;
        Ok(ProductModel {
            id: conn.last_insert_rowid(),
            model: model.model.clone(),
            process: model.process.clone(),
        })
    }

    pub fn update(&self, id: i64, model: &NewProductModel) -> RepositoryResult<ProductModel> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE models SET model = ?1, process = ?2 WHERE id = ?3",
            params![model.model, model.process, id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Model", id));
        }
        Ok(ProductModel {
            id,
            model: model.model.clone(),
            process: model.process.clone(),
        })
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM models WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Model", id));
        }
        Ok(())
    }

    /// 全部型号（按型号代码升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<ProductModel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, model, process FROM models ORDER BY model ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(ProductModel {
                id: row.get(0)?,
                model: row.get(1)?,
                process: row.get(2)?,
            })
        })?;
        let mut models = Vec::new();
        for row in rows {
            models.push(row?);
        }
        Ok(models)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM models", [], |row| row.get(0))?)
    }
}
