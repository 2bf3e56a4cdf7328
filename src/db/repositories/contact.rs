//! Contact repository
//!
//! Database operations for contact-form submissions.
//!
//! This module provides:
//! - `ContactRepository` trait defining the interface for contact data access
//! - `SqlxContactRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Contact, NewContact};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Contact repository trait
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist a new submission and return the stored record
    async fn create(&self, input: &NewContact) -> Result<Contact>;

    /// Get a submission by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Contact>>;
}

/// SQLx-based contact repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxContactRepository {
    pool: DynDatabasePool,
}

impl SqlxContactRepository {
    /// Create a new SQLx contact repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContactRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, input: &NewContact) -> Result<Contact> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_contact_sqlite(self.pool.as_sqlite().unwrap(), input).await
            }
            DatabaseDriver::Mysql => {
                create_contact_mysql(self.pool.as_mysql().unwrap(), input).await
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Contact>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_contact_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => {
                get_contact_by_id_mysql(self.pool.as_mysql().unwrap(), id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_contact_sqlite(pool: &SqlitePool, input: &NewContact) -> Result<Contact> {
    let now = Utc::now();

    // Insert inside an explicit transaction so a failed write never leaves
    // a partial record behind. The transaction rolls back on drop.
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO contacts (name, email, subject, message, ip_address, status, created_at)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(&input.ip_address)
    .bind(now)
    .execute(&mut *tx)
    .await
    .context("Failed to create contact")?;

    let id = result.last_insert_rowid();

    tx.commit().await.context("Failed to commit contact")?;

    Ok(Contact {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        subject: input.subject.clone(),
        message: input.message.clone(),
        ip_address: input.ip_address.clone(),
        status: "pending".to_string(),
        created_at: now,
    })
}

async fn get_contact_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Contact>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, email, subject, message, ip_address, status, created_at
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get contact by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_contact_sqlite(&row)?)),
        None => Ok(None),
    }
}

fn row_to_contact_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Contact> {
    Ok(Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get::<Option<String>, _>("subject").unwrap_or_default(),
        message: row.get("message"),
        ip_address: row.get("ip_address"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_contact_mysql(pool: &MySqlPool, input: &NewContact) -> Result<Contact> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO contacts (name, email, subject, message, ip_address, status, created_at)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(&input.ip_address)
    .bind(now)
    .execute(&mut *tx)
    .await
    .context("Failed to create contact")?;

    let id = result.last_insert_id() as i64;

    tx.commit().await.context("Failed to commit contact")?;

    Ok(Contact {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        subject: input.subject.clone(),
        message: input.message.clone(),
        ip_address: input.ip_address.clone(),
        status: "pending".to_string(),
        created_at: now,
    })
}

async fn get_contact_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Contact>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, email, subject, message, ip_address, status, created_at
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get contact by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_contact_mysql(&row)?)),
        None => Ok(None),
    }
}

fn row_to_contact_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Contact> {
    Ok(Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get::<Option<String>, _>("subject").unwrap_or_default(),
        message: row.get("message"),
        ip_address: row.get("ip_address"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}
