use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{cases, clients};

pub mod migrator;
pub mod repositories;

pub use repositories::case::{CaseInput, CaseStatus, CaseUpdate, CaseWithClient};
pub use repositories::client::{ClientInput, ClientUpdate};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn client_repo(&self) -> repositories::client::ClientRepository {
        repositories::client::ClientRepository::new(self.conn.clone())
    }

    fn case_repo(&self) -> repositories::case::CaseRepository {
        repositories::case::CaseRepository::new(self.conn.clone())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.user_repo().create(name, email, password).await
    }

    pub async fn authenticate_user(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().authenticate(email, password).await
    }

    // ------------------------------------------------------------------
    // Clients
    // ------------------------------------------------------------------

    pub async fn list_clients(&self, search: Option<&str>) -> Result<Vec<clients::Model>> {
        self.client_repo().list(search).await
    }

    pub async fn get_client(&self, id: i32) -> Result<Option<clients::Model>> {
        self.client_repo().get(id).await
    }

    pub async fn create_client(&self, input: ClientInput) -> Result<clients::Model> {
        self.client_repo().create(input).await
    }

    pub async fn update_client(
        &self,
        id: i32,
        update: ClientUpdate,
    ) -> Result<Option<clients::Model>> {
        self.client_repo().update(id, update).await
    }

    // ------------------------------------------------------------------
    // Cases
    // ------------------------------------------------------------------

    pub async fn list_cases(&self, search: Option<&str>) -> Result<Vec<CaseWithClient>> {
        self.case_repo().list(search).await
    }

    pub async fn get_case(&self, id: i32) -> Result<Option<CaseWithClient>> {
        self.case_repo().get(id).await
    }

    pub async fn create_case(&self, input: CaseInput) -> Result<cases::Model> {
        self.case_repo().create(input).await
    }

    pub async fn update_case(&self, id: i32, update: CaseUpdate) -> Result<Option<cases::Model>> {
        self.case_repo().update(id, update).await
    }

    pub async fn upcoming_cases(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CaseWithClient>> {
        self.case_repo().upcoming(from, to).await
    }

    pub async fn cases_due_on(&self, date: NaiveDate) -> Result<Vec<CaseWithClient>> {
        self.case_repo().due_on(date).await
    }

    pub async fn count_cases_by_status(&self, status: CaseStatus) -> Result<u64> {
        self.case_repo().count_by_status(status).await
    }
}
