//! Admin action log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::traits::AdminActionRecord;
use hotel_core::types::{PageRequest, PageResponse};
use hotel_entity::admin::{AdminAction, AdminActionFilter};

use crate::error::map_db;

/// Repository for the append-only admin action log.
#[derive(Debug, Clone)]
pub struct AdminActionRepository {
    pool: SqlitePool,
}

impl AdminActionRepository {
    /// Create a new admin action repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an action.
    pub async fn create(
        &self,
        record: &AdminActionRecord,
        now: DateTime<Utc>,
    ) -> AppResult<AdminAction> {
        sqlx::query_as::<_, AdminAction>(
            "INSERT INTO admin_actions (id, admin_id, action_type, target_type, target_id, detail, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(record.admin_id)
        .bind(&record.action_type)
        .bind(&record.target_type)
        .bind(record.target_id)
        .bind(sqlx::types::Json(&record.detail))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to record admin action"))
    }

    /// Search the log with filters, newest first.
    pub async fn search(
        &self,
        filter: &AdminActionFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AdminAction>> {
        let mut conditions = Vec::new();
        if filter.admin_id.is_some() {
            conditions.push("admin_id = ?");
        }
        if filter.action_type.is_some() {
            conditions.push("action_type = ?");
        }
        if filter.target_id.is_some() {
            conditions.push("target_id = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM admin_actions {where_clause}");
        let select_sql = format!(
            "SELECT * FROM admin_actions {where_clause} \
             ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AdminAction>(&select_sql);

        if let Some(aid) = filter.admin_id {
            count_query = count_query.bind(aid);
            select_query = select_query.bind(aid);
        }
        if let Some(a) = &filter.action_type {
            count_query = count_query.bind(a.clone());
            select_query = select_query.bind(a.clone());
        }
        if let Some(tid) = filter.target_id {
            count_query = count_query.bind(tid);
            select_query = select_query.bind(tid);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count admin actions"))?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to search admin actions"))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
