use super::Summary;
use crate::models::ProductRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Single-product representation: the summary plus timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    #[serde(flatten)]
    pub summary: Summary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRecord> for Detail {
    fn from(record: ProductRecord) -> Self {
        let created_at = record.product.created_at;
        let updated_at = record.product.updated_at;

        Self {
            summary: record.into(),
            created_at,
            updated_at,
        }
    }
}
