// src/domain/catalog/fields.rs
//! Field sets of the seven catalog kinds.
use crate::domain::catalog::entity::{CatalogFields, CatalogReference};
use crate::domain::catalog::value_objects::{
    CardSet, CatalogKind, DiceSet, Isbn, Mechanic, ProductType, SourcebookType, check_optional_text,
    check_url, require_text,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{SlugConfig, SlugSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const MEDIA_PATH_MAX_LENGTH: usize = 255;

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: &Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

fn default_true() -> bool {
    true
}

fn check_media(field: &str, value: Option<&str>) -> DomainResult<()> {
    check_optional_text(field, value, MEDIA_PATH_MAX_LENGTH)
}

fn check_distinct_ids(field: &str, ids: &[Uuid]) -> DomainResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("{field} contains duplicates")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameLicenseFields {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creative_commons: bool,
    #[serde(default)]
    pub ogl_compatible: bool,
    #[serde(default)]
    pub viral: bool,
    #[serde(default)]
    pub allows_commercial_adaptations: bool,
    #[serde(default)]
    pub requires_royalty: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl SlugSource for GameLicenseFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "description" => Some(text(&self.description)),
            "url" => Some(text(&self.url)),
            _ => None,
        }
    }
}

impl CatalogFields for GameLicenseFields {
    const KIND: CatalogKind = CatalogKind::GameLicense;
    const SLUG: SlugConfig = SlugConfig::new(&["title"]).with_fallback("license");

    fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, 250)?;
        check_url("url", self.url.as_deref())
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublisherFields {
    pub name: String,
    #[serde(default)]
    pub founded_on: Option<NaiveDate>,
    #[serde(default)]
    pub closed_on: Option<NaiveDate>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Media path of the logo image.
    #[serde(default)]
    pub logo: Option<String>,
}

impl SlugSource for PublisherFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "founded_on" => Some(date(&self.founded_on)),
            "closed_on" => Some(date(&self.closed_on)),
            "url" => Some(text(&self.url)),
            "description" => Some(text(&self.description)),
            _ => None,
        }
    }
}

impl CatalogFields for PublisherFields {
    const KIND: CatalogKind = CatalogKind::Publisher;
    const SLUG: SlugConfig = SlugConfig::new(&["name"]).with_fallback("publisher");

    fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name, 250)?;
        check_url("url", self.url.as_deref())?;
        check_media("logo", self.logo.as_deref())?;
        if let (Some(founded), Some(closed)) = (self.founded_on, self.closed_on) {
            if closed < founded {
                return Err(DomainError::Validation(
                    "closed_on cannot be earlier than founded_on".into(),
                ));
            }
        }
        Ok(())
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorFields {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Whether the recorded name is no longer used by the author.
    #[serde(default)]
    pub deadname: bool,
}

impl SlugSource for AuthorFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "display_name" => Some(text(&self.display_name)),
            _ => None,
        }
    }
}

impl CatalogFields for AuthorFields {
    const KIND: CatalogKind = CatalogKind::Author;
    const SLUG: SlugConfig =
        SlugConfig::new(&["first_name", "last_name"]).with_fallback("author");

    fn validate(&self) -> DomainResult<()> {
        require_text("last_name", &self.last_name, 100)?;
        require_text("first_name", &self.first_name, 100)?;
        check_optional_text("display_name", self.display_name.as_deref(), 250)
    }

    fn display_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameSystemFields {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    /// A system reference document is available.
    #[serde(default)]
    pub srd: bool,
    #[serde(default)]
    pub srd_release_date: Option<NaiveDate>,
    #[serde(default)]
    pub open_licensing: bool,
    #[serde(default)]
    pub publisher_id: Option<Uuid>,
    #[serde(default)]
    pub license_ids: Vec<Uuid>,
    #[serde(default)]
    pub primary_resolution_mechanic: Mechanic,
    #[serde(default)]
    pub secondary_resolution_mechanic: Option<Mechanic>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub primary_author_ids: Vec<Uuid>,
    #[serde(default)]
    pub additional_author_ids: Vec<Uuid>,
    #[serde(default)]
    pub cards_used: Option<CardSet>,
    #[serde(default)]
    pub dice_used: Option<DiceSet>,
    #[serde(default)]
    pub exploding_dice: bool,
    #[serde(default)]
    pub playbooks: bool,
    #[serde(default)]
    pub minis_required: bool,
    #[serde(default)]
    pub tokens: bool,
    #[serde(default)]
    pub partial_success: bool,
    #[serde(default)]
    pub gm_less: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub img: Option<String>,
}

impl SlugSource for GameSystemFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "description" => Some(text(&self.description)),
            "release_date" => Some(date(&self.release_date)),
            "url" => Some(text(&self.url)),
            "primary_resolution_mechanic" => Some(self.primary_resolution_mechanic.to_string()),
            _ => None,
        }
    }
}

impl CatalogFields for GameSystemFields {
    const KIND: CatalogKind = CatalogKind::GameSystem;
    const SLUG: SlugConfig = SlugConfig::new(&["title"]).with_fallback("system");

    fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, 300)?;
        check_url("url", self.url.as_deref())?;
        check_media("img", self.img.as_deref())?;
        check_distinct_ids("license_ids", &self.license_ids)?;
        check_distinct_ids("primary_author_ids", &self.primary_author_ids)?;
        check_distinct_ids("additional_author_ids", &self.additional_author_ids)?;
        if self.srd_release_date.is_some() && !self.srd {
            return Err(DomainError::Validation(
                "srd_release_date requires srd to be set".into(),
            ));
        }
        Ok(())
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn references(&self) -> Vec<CatalogReference> {
        let mut refs: Vec<CatalogReference> = self
            .publisher_id
            .map(|id| CatalogReference::new("publisher_id", CatalogKind::Publisher, id))
            .into_iter()
            .collect();
        refs.extend(CatalogReference::many(
            "license_ids",
            CatalogKind::GameLicense,
            &self.license_ids,
        ));
        refs.extend(CatalogReference::many(
            "primary_author_ids",
            CatalogKind::Author,
            &self.primary_author_ids,
        ));
        refs.extend(CatalogReference::many(
            "additional_author_ids",
            CatalogKind::Author,
            &self.additional_author_ids,
        ));
        refs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameFields {
    pub title: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SlugSource for GameFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "url" => Some(text(&self.url)),
            _ => None,
        }
    }
}

impl CatalogFields for GameFields {
    const KIND: CatalogKind = CatalogKind::Game;
    const SLUG: SlugConfig = SlugConfig::new(&["title"]).with_fallback("game");

    fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, 200)?;
        check_url("url", self.url.as_deref())?;
        check_media("img", self.img.as_deref())
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EditionFields {
    pub game_id: Uuid,
    pub system_id: Uuid,
    pub publisher_id: Uuid,
    /// Subtitle identifying this edition.
    pub edition_identifier: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SlugSource for EditionFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "edition_identifier" => Some(self.edition_identifier.clone()),
            "description" => Some(text(&self.description)),
            "release_date" => Some(date(&self.release_date)),
            "url" => Some(text(&self.url)),
            _ => None,
        }
    }
}

impl CatalogFields for EditionFields {
    const KIND: CatalogKind = CatalogKind::Edition;
    const SLUG: SlugConfig =
        SlugConfig::new(&["edition_identifier"]).with_fallback("edition");

    fn validate(&self) -> DomainResult<()> {
        require_text("edition_identifier", &self.edition_identifier, 100)?;
        check_url("url", self.url.as_deref())?;
        check_media("img", self.img.as_deref())
    }

    fn display_name(&self) -> String {
        self.edition_identifier.clone()
    }

    fn references(&self) -> Vec<CatalogReference> {
        vec![
            CatalogReference::new("game_id", CatalogKind::Game, self.game_id),
            CatalogReference::new("system_id", CatalogKind::GameSystem, self.system_id),
            CatalogReference::new("publisher_id", CatalogKind::Publisher, self.publisher_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductFields {
    pub edition_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub sourcebook_type: Option<SourcebookType>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "978-0-306-40615-7")]
    pub isbn: Option<Isbn>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub primary_author_ids: Vec<Uuid>,
    #[serde(default)]
    pub additional_author_ids: Vec<Uuid>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub available_print: bool,
    #[serde(default = "default_true")]
    pub available_digital: bool,
}

impl SlugSource for ProductFields {
    fn slug_field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "product_type" => Some(self.product_type.to_string()),
            "isbn" => Some(self.isbn.as_ref().map(|i| i.to_string()).unwrap_or_default()),
            "release_date" => Some(date(&self.release_date)),
            "url" => Some(text(&self.url)),
            _ => None,
        }
    }
}

impl CatalogFields for ProductFields {
    const KIND: CatalogKind = CatalogKind::Product;
    const SLUG: SlugConfig = SlugConfig::new(&["title"]).with_fallback("product");

    fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, 200)?;
        check_url("url", self.url.as_deref())?;
        check_media("img", self.img.as_deref())?;
        check_distinct_ids("primary_author_ids", &self.primary_author_ids)?;
        check_distinct_ids("additional_author_ids", &self.additional_author_ids)?;
        if self.sourcebook_type.is_some() && self.product_type != ProductType::Sourcebook {
            return Err(DomainError::Validation(
                "sourcebook_type only applies to source books".into(),
            ));
        }
        Ok(())
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn references(&self) -> Vec<CatalogReference> {
        let mut refs = vec![CatalogReference::new(
            "edition_id",
            CatalogKind::Edition,
            self.edition_id,
        )];
        refs.extend(CatalogReference::many(
            "primary_author_ids",
            CatalogKind::Author,
            &self.primary_author_ids,
        ));
        refs.extend(CatalogReference::many(
            "additional_author_ids",
            CatalogKind::Author,
            &self.additional_author_ids,
        ));
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: &str, last: &str) -> AuthorFields {
        AuthorFields {
            last_name: last.into(),
            first_name: first.into(),
            display_name: None,
            deadname: false,
        }
    }

    #[test]
    fn author_slug_config_names_existing_fields() {
        let fields = author("Ursula", "Le Guin");
        assert!(AuthorFields::SLUG.check(&fields).is_ok());
        assert_eq!(fields.display_name(), "Ursula Le Guin");
    }

    #[test]
    fn every_kind_slug_config_is_consistent() {
        let game = GameFields {
            title: "Blades in the Dark".into(),
            img: None,
            url: None,
        };
        assert!(GameFields::SLUG.check(&game).is_ok());
        assert!(GameLicenseFields::SLUG.source_fields() == ["title"]);
        assert!(EditionFields::SLUG.source_fields() == ["edition_identifier"]);
        assert_eq!(PublisherFields::SLUG.fallback(), "publisher");
    }

    #[test]
    fn blank_required_text_is_rejected() {
        assert!(author("", "Le Guin").validate().is_err());
        assert!(author("Ursula", "   ").validate().is_err());
        assert!(author(&"x".repeat(101), "Le Guin").validate().is_err());
    }

    #[test]
    fn product_defaults_apply_when_deserializing() {
        let product: ProductFields = serde_json::from_value(serde_json::json!({
            "edition_id": Uuid::nil(),
            "title": "Core Rulebook",
            "isbn": "978-0-306-40615-7"
        }))
        .unwrap();
        assert_eq!(product.product_type, ProductType::Sourcebook);
        assert!(!product.available_print);
        assert!(product.available_digital);
        assert_eq!(product.isbn.unwrap().as_str(), "9780306406157");
    }

    #[test]
    fn invalid_isbn_fails_deserialization() {
        let result: Result<ProductFields, _> = serde_json::from_value(serde_json::json!({
            "edition_id": Uuid::nil(),
            "title": "Core Rulebook",
            "isbn": "978-0-306-40615-8"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn product_references_cover_edition_and_authors() {
        let author_id = Uuid::new_v4();
        let product: ProductFields = serde_json::from_value(serde_json::json!({
            "edition_id": Uuid::nil(),
            "title": "Core Rulebook",
            "additional_author_ids": [author_id]
        }))
        .unwrap();
        let refs = product.references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, CatalogKind::Edition);
        assert_eq!(refs[1].field, "additional_author_ids");
        assert_eq!(refs[1].id.0, author_id);
        assert!(author("Ursula", "Le Guin").references().is_empty());
    }

    #[test]
    fn publisher_cannot_close_before_founding() {
        let publisher = PublisherFields {
            name: "Chaosium".into(),
            founded_on: NaiveDate::from_ymd_opt(1975, 1, 1),
            closed_on: NaiveDate::from_ymd_opt(1970, 1, 1),
            url: None,
            description: None,
            logo: None,
        };
        assert!(publisher.validate().is_err());
    }
}
