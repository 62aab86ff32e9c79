use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::RacketForm;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Racket {
    pub id: Uuid,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "peso")]
    pub weight: f64,
    pub material: String,
    pub created_at: OffsetDateTime,
}

impl Racket {
    pub async fn find_all(db: &PgPool) -> Result<Vec<Racket>, sqlx::Error> {
        sqlx::query_as::<_, Racket>(
            r#"
            SELECT id, brand, price, model, weight, material, created_at
            FROM raquetas
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Racket>, sqlx::Error> {
        sqlx::query_as::<_, Racket>(
            r#"
            SELECT id, brand, price, model, weight, material, created_at
            FROM raquetas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &PgPool, form: &RacketForm) -> Result<Racket, sqlx::Error> {
        sqlx::query_as::<_, Racket>(
            r#"
            INSERT INTO raquetas (brand, price, model, weight, material)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, brand, price, model, weight, material, created_at
            "#,
        )
        .bind(&form.brand)
        .bind(form.price)
        .bind(&form.model)
        .bind(form.weight)
        .bind(&form.material)
        .fetch_one(db)
        .await
    }

    /// Full replace of all five fields. `None` means no record had that id.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        form: &RacketForm,
    ) -> Result<Option<Racket>, sqlx::Error> {
        sqlx::query_as::<_, Racket>(
            r#"
            UPDATE raquetas
            SET brand = $2, price = $3, model = $4, weight = $5, material = $6
            WHERE id = $1
            RETURNING id, brand, price, model, weight, material, created_at
            "#,
        )
        .bind(id)
        .bind(&form.brand)
        .bind(form.price)
        .bind(&form.model)
        .bind(form.weight)
        .bind(&form.material)
        .fetch_optional(db)
        .await
    }

    /// Idempotent: deleting an absent id is not an error.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM raquetas WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
