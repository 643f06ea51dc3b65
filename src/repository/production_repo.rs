// ==========================================
// CNC 生产 KPI 看板 - 生产记录仓储
// ==========================================
// 职责: 管理 production 表的 CRUD 与按条件查询
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::production::{NewProductionRecord, ProductionFilter, ProductionRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT id, date, worker, line, model,
           target_quantity, produced_quantity, defect_quantity, note
    FROM production
"#;

/// 查询结果排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrder {
    /// 日期降序（列表展示）
    #[default]
    DateDesc,
    /// 写入顺序（报表聚合，“首次出现”语义依赖此顺序）
    Insertion,
}

// ==========================================
// ProductionRepository - 生产记录仓储
// ==========================================
pub struct ProductionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRepository {
    /// 创建新的 ProductionRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入单条记录，返回新主键
    pub fn insert(&self, record: &NewProductionRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        insert_with(&conn, record)?;
        Ok(conn.last_insert_rowid())
    }

    /// 批量插入（事务化，全部成功或全部回滚）
    ///
    /// # 返回
    /// - Ok(usize): 插入的记录数
    pub fn batch_insert(&self, records: &[NewProductionRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for record in records {
            insert_with(&tx, record)?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 更新记录（整行覆盖，后写覆盖先写）
    pub fn update(&self, id: i64, record: &NewProductionRecord) -> RepositoryResult<ProductionRecord> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE production SET
                date = ?1, worker = ?2, line = ?3, model = ?4,
                target_quantity = ?5, produced_quantity = ?6, defect_quantity = ?7,
                note = ?8
            WHERE id = ?9
            "#,
            params![
                record.date,
                record.worker,
                record.line,
                record.model,
                record.target_quantity,
                record.produced_quantity,
                record.defect_quantity,
                record.note,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Production", id));
        }
        Ok(record.clone().with_id(id))
    }

    /// 删除单条记录
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM production WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Production", id));
        }
        Ok(())
    }

    /// 删除早于截止日（不含）的全部记录
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    pub fn delete_before(&self, cutoff: NaiveDate) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM production WHERE date < ?1", params![cutoff])?;
        Ok(affected)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProductionRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let result = conn.query_row(&sql, params![id], map_row);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按条件查询（日期降序）
    pub fn find(&self, filter: &ProductionFilter) -> RepositoryResult<Vec<ProductionRecord>> {
        self.find_ordered(filter, RecordOrder::DateDesc)
    }

    /// 按条件查询，指定排序
    pub fn find_ordered(
        &self,
        filter: &ProductionFilter,
        order: RecordOrder,
    ) -> RepositoryResult<Vec<ProductionRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(start) = filter.start_date {
            values.push(Box::new(start));
            conditions.push(format!("date >= ?{}", values.len()));
        }
        if let Some(end) = filter.end_date {
            values.push(Box::new(end));
            conditions.push(format!("date <= ?{}", values.len()));
        }
        if let Some(worker) = &filter.worker {
            values.push(Box::new(worker.clone()));
            conditions.push(format!("worker = ?{}", values.len()));
        }
        if let Some(line) = &filter.line {
            values.push(Box::new(line.clone()));
            conditions.push(format!("line = ?{}", values.len()));
        }
        if let Some(model) = &filter.model {
            values.push(Box::new(model.clone()));
            conditions.push(format!("model = ?{}", values.len()));
        }

        let mut sql = SELECT_COLUMNS.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(match order {
            RecordOrder::DateDesc => " ORDER BY date DESC, id ASC",
            RecordOrder::Insertion => " ORDER BY id ASC",
        });

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM production", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn insert_with(conn: &Connection, record: &NewProductionRecord) -> rusqlite::Result<usize> {
    conn.execute(
        r#"
        INSERT INTO production (
            date, worker, line, model,
            target_quantity, produced_quantity, defect_quantity, note
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            record.date,
            record.worker,
            record.line,
            record.model,
            record.target_quantity,
            record.produced_quantity,
            record.defect_quantity,
            record.note,
        ],
    )
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ProductionRecord> {
    Ok(ProductionRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        worker: row.get(2)?,
        line: row.get(3)?,
        model: row.get(4)?,
        target_quantity: row.get(5)?,
        produced_quantity: row.get(6)?,
        defect_quantity: row.get(7)?,
        note: row.get(8)?,
    })
}
