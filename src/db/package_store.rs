use crate::{
    db::{DbPool, tables::PackageTable},
    error::{AppError, Result},
    models::package::{NewPackage, Package},
};

/// Package store for database operations
pub struct PackageStore {
    pool: DbPool,
}

impl PackageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a package row. A taken name yields `AppError::Duplicate`.
    pub async fn insert(&self, package: &NewPackage) -> Result<Package> {
        let scores = &package.scores;
        let result = sqlx::query(
            r#"
            INSERT INTO packages (
                name, url, version, license_score, netscore, dependency_pinning_score,
                rampup_score, review_percentage_score, bus_factor, correctness,
                responsive_maintainer
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.name)
        .bind(&package.url)
        .bind(&package.version)
        .bind(scores.license_score)
        .bind(scores.netscore)
        .bind(scores.dependency_pinning_score)
        .bind(scores.rampup_score)
        .bind(scores.review_percentage_score)
        .bind(scores.bus_factor)
        .bind(scores.correctness)
        .bind(scores.responsive_maintainer)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::Duplicate {
                    table: PackageTable::TABLE_NAME,
                    key: package.name.clone(),
                }
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::debug!("Inserted package {}", package.name);

        let inserted = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&self.pool)
            .await?;

        Ok(inserted)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Package>> {
        let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(package)
    }
}
