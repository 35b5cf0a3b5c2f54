//! Fixtures shared by unit and router tests

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::domain::staff::{Staff, StaffRole};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::hash_password;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub const TEST_PASSWORD: &str = "password123";

/// Fresh, fully migrated in-memory database
pub async fn database() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
    })
    .await
    .expect("in-memory database");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn repositories() -> Arc<dyn RepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(database().await))
}

pub async fn seed_staff(repos: &dyn RepositoryProvider, email: &str, role: StaffRole) -> Staff {
    let hash = hash_password(TEST_PASSWORD).expect("hash");
    repos
        .staff()
        .create(Staff::new("Test", role.display_name(), email, hash, role))
        .await
        .expect("seed staff")
}
