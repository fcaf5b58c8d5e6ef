use crate::models::User;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn upsert(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    let query_span = tracing::info_span!("Saving user.", user_id = %user.id);
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, role, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name, email = EXCLUDED.email, role = EXCLUDED.role
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.role)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to save user: {:?}", err);
        err
    })
}

pub async fn fetch(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch user.", user_id = %id);
    sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user: {:?}", err);
            err
        })
}
