//! # PostgreSQL Repository
//!
//! sqlx implementation of [`PermisRepository`] over the `permis` table.
//! All values are bound as statement parameters.

use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{NewPermis, Permis, PermisPatch};
use super::repository::{PermisRepository, StorageResult};

const INSERT_QUERY: &str = r#"
    INSERT INTO permis (nom, prenom, datenaissance, lieunaissance, numeropermis, residence,
                        mention, restriction, dateobtention, dateexpiration, categorie, statut, image)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
    RETURNING *
"#;

const SELECT_ALL_QUERY: &str = r#"SELECT * FROM permis ORDER BY id"#;

const SELECT_BY_ID_QUERY: &str = r#"SELECT * FROM permis WHERE id = $1"#;

const UPDATE_QUERY: &str = r#"
    UPDATE permis
    SET nom = COALESCE($2, nom),
        prenom = COALESCE($3, prenom),
        datenaissance = COALESCE($4, datenaissance),
        lieunaissance = COALESCE($5, lieunaissance),
        numeropermis = COALESCE($6, numeropermis),
        residence = COALESCE($7, residence),
        mention = COALESCE($8, mention),
        restriction = COALESCE($9, restriction),
        dateobtention = COALESCE($10, dateobtention),
        dateexpiration = COALESCE($11, dateexpiration),
        categorie = COALESCE($12, categorie),
        statut = COALESCE($13, statut),
        image = COALESCE($14, image)
    WHERE id = $1
    RETURNING *
"#;

const DELETE_QUERY: &str = r#"DELETE FROM permis WHERE id = $1 RETURNING *"#;

/// Repository backed by a shared connection pool
#[derive(Clone)]
pub struct PgPermisRepository {
    pool: PgPool,
}

impl PgPermisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermisRepository for PgPermisRepository {
    async fn insert(&self, permis: NewPermis) -> StorageResult<Permis> {
        sqlx::query_as::<_, Permis>(INSERT_QUERY)
            .bind(permis.holder_name)
            .bind(permis.first_name)
            .bind(permis.birth_date)
            .bind(permis.birth_place)
            .bind(permis.license_number)
            .bind(permis.residence)
            .bind(permis.mention)
            .bind(permis.restriction)
            .bind(permis.issued_on)
            .bind(permis.expires_on)
            .bind(permis.category)
            .bind(permis.status)
            .bind(permis.image)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_all(&self) -> StorageResult<Vec<Permis>> {
        sqlx::query_as::<_, Permis>(SELECT_ALL_QUERY)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Permis>> {
        sqlx::query_as::<_, Permis>(SELECT_BY_ID_QUERY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, id: i32, patch: PermisPatch) -> StorageResult<Option<Permis>> {
        sqlx::query_as::<_, Permis>(UPDATE_QUERY)
            .bind(id)
            .bind(patch.holder_name)
            .bind(patch.first_name)
            .bind(patch.birth_date)
            .bind(patch.birth_place)
            .bind(patch.license_number)
            .bind(patch.residence)
            .bind(patch.mention)
            .bind(patch.restriction)
            .bind(patch.issued_on)
            .bind(patch.expires_on)
            .bind(patch.category)
            .bind(patch.status)
            .bind(patch.image)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i32) -> StorageResult<Option<Permis>> {
        sqlx::query_as::<_, Permis>(DELETE_QUERY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
