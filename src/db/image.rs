use crate::models::{NewImage, ProductImage};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::Instrument;
use uuid::Uuid;

const SELECT_IMAGES: &str = r#"
    SELECT id, product_id, url, alt, position, created_at
    FROM product_images
"#;

pub async fn fetch_by_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<ProductImage>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch images of product.", %product_id);
    sqlx::query_as::<_, ProductImage>(&format!(
        "{SELECT_IMAGES} WHERE product_id = $1 ORDER BY position"
    ))
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch images: {:?}", err);
        err
    })
}

/// Images of several products, grouped by product and in stored order.
pub async fn fetch_by_products(pool: &PgPool, product_ids: &[Uuid]) -> Result<Vec<ProductImage>, sqlx::Error> {
    if product_ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Fetch images of products.", count = product_ids.len());
    sqlx::query_as::<_, ProductImage>(&format!(
        "{SELECT_IMAGES} WHERE product_id = ANY($1) ORDER BY product_id, position"
    ))
    .bind(product_ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch images: {:?}", err);
        err
    })
}

/// Inserts `images` in order, positions starting at 0.
pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    product_name: &str,
    images: &[NewImage],
) -> Result<(), sqlx::Error> {
    if images.is_empty() {
        return Ok(());
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO product_images (id, product_id, url, alt, position) ");
    builder.push_values(images.iter().enumerate(), |mut row, (position, image)| {
        row.push_bind(Uuid::new_v4())
            .push_bind(product_id)
            .push_bind(image.url.clone())
            .push_bind(image.resolve_alt(product_name))
            .push_bind(position as i32);
    });

    builder
        .build()
        .execute(&mut **tx)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to insert images: {:?}", err);
            err
        })
}

pub async fn delete_by_product(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
) -> Result<u64, sqlx::Error> {
    sqlx::query("DELETE FROM product_images WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut **tx)
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!("Failed to delete images: {:?}", err);
            err
        })
}
