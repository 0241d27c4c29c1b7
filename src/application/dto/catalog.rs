use crate::domain::catalog::{
    CardSet, CatalogEntry, Choice, DiceSet, Mechanic, ProductType, SourcebookType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A catalog entry with its kind specific fields inlined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto<F> {
    pub id: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> From<CatalogEntry<F>> for CatalogEntryDto<F> {
    fn from(entry: CatalogEntry<F>) -> Self {
        Self {
            id: entry.id.into(),
            slug: entry.slug.into(),
            created_at: entry.created_at,
            modified_at: entry.modified_at,
            fields: entry.fields,
        }
    }
}

/// Codes accepted by the choice fields of catalog entries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogChoicesDto {
    pub sourcebook_types: Vec<Choice>,
    pub card_sets: Vec<Choice>,
    pub dice_sets: Vec<Choice>,
    pub product_types: Vec<Choice>,
    pub mechanics: Vec<Choice>,
}

impl CatalogChoicesDto {
    pub fn current() -> Self {
        Self {
            sourcebook_types: SourcebookType::choices(),
            card_sets: CardSet::choices(),
            dice_sets: DiceSet::choices(),
            product_types: ProductType::choices(),
            mechanics: Mechanic::choices(),
        }
    }
}
