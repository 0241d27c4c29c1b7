// src/infrastructure/repositories/catalog/columns.rs
//! Column layout of each catalog table.
use crate::domain::catalog::{
    AuthorFields, CatalogFields, EditionFields, GameFields, GameLicenseFields, GameSystemFields,
    Isbn, ProductFields, PublisherFields,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::repositories::map_sqlx;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder, Row, postgres::PgRow};
use std::str::FromStr;
use uuid::Uuid;

pub enum ColumnValue {
    Text(Option<String>),
    Bool(bool),
    Date(Option<NaiveDate>),
    Reference(Option<Uuid>),
}

impl ColumnValue {
    pub fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            ColumnValue::Text(value) => builder.push_bind(value),
            ColumnValue::Bool(value) => builder.push_bind(value),
            ColumnValue::Date(value) => builder.push_bind(value),
            ColumnValue::Reference(value) => builder.push_bind(value),
        };
    }
}

fn text(value: impl Into<String>) -> ColumnValue {
    ColumnValue::Text(Some(value.into()))
}

fn opt_text(value: Option<String>) -> ColumnValue {
    ColumnValue::Text(value)
}

fn code<T: ToString>(value: Option<T>) -> ColumnValue {
    ColumnValue::Text(value.map(|v| v.to_string()))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> DomainResult<T>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column).map_err(map_sqlx)
}

fn get_code<T>(row: &PgRow, column: &str) -> DomainResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    let raw: Option<String> = get(row, column)?;
    raw.map(|value| {
        T::from_str(&value).map_err(|err| {
            DomainError::Persistence(format!("corrupt value in column {column}: {err}"))
        })
    })
    .transpose()
}

fn get_required_code<T>(row: &PgRow, column: &str) -> DomainResult<T>
where
    T: FromStr<Err = DomainError>,
{
    get_code(row, column)?
        .ok_or_else(|| DomainError::Persistence(format!("column {column} is unexpectedly null")))
}

/// A list of references stored in a join table, one row per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTable {
    /// Field name, also the alias the ids are selected under.
    pub field: &'static str,
    pub table: &'static str,
    pub owner_column: &'static str,
    pub target_column: &'static str,
}

impl LinkTable {
    const fn new(
        field: &'static str,
        table: &'static str,
        owner_column: &'static str,
        target_column: &'static str,
    ) -> Self {
        Self {
            field,
            table,
            owner_column,
            target_column,
        }
    }
}

/// Field sets that know how to read and write their catalog table.
///
/// The base table is aliased `t` in every select, so `ORDER_BY` may use
/// correlated subqueries against other tables.
pub trait PgCatalogFields: CatalogFields {
    /// Kind specific columns, in the order of [`to_columns`](Self::to_columns).
    const COLUMNS: &'static [&'static str];
    const ORDER_BY: &'static str;
    /// Join tables, in the order of [`link_ids`](Self::link_ids).
    const LINKS: &'static [LinkTable] = &[];

    fn to_columns(&self) -> Vec<ColumnValue>;

    fn link_ids(&self) -> Vec<Vec<Uuid>> {
        Vec::new()
    }

    /// Reads the fields from a row holding the columns and the link aliases.
    fn from_row(row: &PgRow) -> DomainResult<Self>;
}

impl PgCatalogFields for GameLicenseFields {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "creative_commons",
        "ogl_compatible",
        "viral",
        "allows_commercial_adaptations",
        "requires_royalty",
        "url",
    ];
    const ORDER_BY: &'static str = "t.title, t.id";

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            text(&self.title),
            opt_text(self.description.clone()),
            ColumnValue::Bool(self.creative_commons),
            ColumnValue::Bool(self.ogl_compatible),
            ColumnValue::Bool(self.viral),
            ColumnValue::Bool(self.allows_commercial_adaptations),
            ColumnValue::Bool(self.requires_royalty),
            opt_text(self.url.clone()),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            title: get(row, "title")?,
            description: get(row, "description")?,
            creative_commons: get(row, "creative_commons")?,
            ogl_compatible: get(row, "ogl_compatible")?,
            viral: get(row, "viral")?,
            allows_commercial_adaptations: get(row, "allows_commercial_adaptations")?,
            requires_royalty: get(row, "requires_royalty")?,
            url: get(row, "url")?,
        })
    }
}

impl PgCatalogFields for PublisherFields {
    const COLUMNS: &'static [&'static str] =
        &["name", "founded_on", "closed_on", "url", "description", "logo"];
    const ORDER_BY: &'static str = "t.name, t.founded_on DESC, t.id";

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            text(&self.name),
            ColumnValue::Date(self.founded_on),
            ColumnValue::Date(self.closed_on),
            opt_text(self.url.clone()),
            opt_text(self.description.clone()),
            opt_text(self.logo.clone()),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            name: get(row, "name")?,
            founded_on: get(row, "founded_on")?,
            closed_on: get(row, "closed_on")?,
            url: get(row, "url")?,
            description: get(row, "description")?,
            logo: get(row, "logo")?,
        })
    }
}

impl PgCatalogFields for AuthorFields {
    const COLUMNS: &'static [&'static str] =
        &["last_name", "first_name", "display_name", "deadname"];
    const ORDER_BY: &'static str = "t.display_name, t.last_name, t.first_name, t.id";

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            text(&self.last_name),
            text(&self.first_name),
            opt_text(self.display_name.clone()),
            ColumnValue::Bool(self.deadname),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            last_name: get(row, "last_name")?,
            first_name: get(row, "first_name")?,
            display_name: get(row, "display_name")?,
            deadname: get(row, "deadname")?,
        })
    }
}

impl PgCatalogFields for GameSystemFields {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "release_date",
        "description",
        "srd",
        "srd_release_date",
        "open_licensing",
        "publisher_id",
        "primary_resolution_mechanic",
        "secondary_resolution_mechanic",
        "url",
        "cards_used",
        "dice_used",
        "exploding_dice",
        "playbooks",
        "minis_required",
        "tokens",
        "partial_success",
        "gm_less",
        "solo",
        "img",
    ];
    const ORDER_BY: &'static str = "t.title, t.id";
    const LINKS: &'static [LinkTable] = &[
        LinkTable::new("license_ids", "game_system_licenses", "system_id", "license_id"),
        LinkTable::new(
            "primary_author_ids",
            "game_system_primary_authors",
            "system_id",
            "author_id",
        ),
        LinkTable::new(
            "additional_author_ids",
            "game_system_additional_authors",
            "system_id",
            "author_id",
        ),
    ];

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            text(&self.title),
            ColumnValue::Date(self.release_date),
            opt_text(self.description.clone()),
            ColumnValue::Bool(self.srd),
            ColumnValue::Date(self.srd_release_date),
            ColumnValue::Bool(self.open_licensing),
            ColumnValue::Reference(self.publisher_id),
            code(Some(self.primary_resolution_mechanic)),
            code(self.secondary_resolution_mechanic),
            opt_text(self.url.clone()),
            code(self.cards_used),
            code(self.dice_used),
            ColumnValue::Bool(self.exploding_dice),
            ColumnValue::Bool(self.playbooks),
            ColumnValue::Bool(self.minis_required),
            ColumnValue::Bool(self.tokens),
            ColumnValue::Bool(self.partial_success),
            ColumnValue::Bool(self.gm_less),
            ColumnValue::Bool(self.solo),
            opt_text(self.img.clone()),
        ]
    }

    fn link_ids(&self) -> Vec<Vec<Uuid>> {
        vec![
            self.license_ids.clone(),
            self.primary_author_ids.clone(),
            self.additional_author_ids.clone(),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            title: get(row, "title")?,
            release_date: get(row, "release_date")?,
            description: get(row, "description")?,
            srd: get(row, "srd")?,
            srd_release_date: get(row, "srd_release_date")?,
            open_licensing: get(row, "open_licensing")?,
            publisher_id: get(row, "publisher_id")?,
            license_ids: get(row, "license_ids")?,
            primary_resolution_mechanic: get_required_code(row, "primary_resolution_mechanic")?,
            secondary_resolution_mechanic: get_code(row, "secondary_resolution_mechanic")?,
            url: get(row, "url")?,
            primary_author_ids: get(row, "primary_author_ids")?,
            additional_author_ids: get(row, "additional_author_ids")?,
            cards_used: get_code(row, "cards_used")?,
            dice_used: get_code(row, "dice_used")?,
            exploding_dice: get(row, "exploding_dice")?,
            playbooks: get(row, "playbooks")?,
            minis_required: get(row, "minis_required")?,
            tokens: get(row, "tokens")?,
            partial_success: get(row, "partial_success")?,
            gm_less: get(row, "gm_less")?,
            solo: get(row, "solo")?,
            img: get(row, "img")?,
        })
    }
}

impl PgCatalogFields for GameFields {
    const COLUMNS: &'static [&'static str] = &["title", "img", "url"];
    const ORDER_BY: &'static str = "t.title, t.id";

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            text(&self.title),
            opt_text(self.img.clone()),
            opt_text(self.url.clone()),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            title: get(row, "title")?,
            img: get(row, "img")?,
            url: get(row, "url")?,
        })
    }
}

impl PgCatalogFields for EditionFields {
    const COLUMNS: &'static [&'static str] = &[
        "game_id",
        "system_id",
        "publisher_id",
        "edition_identifier",
        "description",
        "release_date",
        "img",
        "url",
    ];
    const ORDER_BY: &'static str = "t.release_date, t.edition_identifier, t.id";

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            ColumnValue::Reference(Some(self.game_id)),
            ColumnValue::Reference(Some(self.system_id)),
            ColumnValue::Reference(Some(self.publisher_id)),
            text(&self.edition_identifier),
            opt_text(self.description.clone()),
            ColumnValue::Date(self.release_date),
            opt_text(self.img.clone()),
            opt_text(self.url.clone()),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        Ok(Self {
            game_id: get(row, "game_id")?,
            system_id: get(row, "system_id")?,
            publisher_id: get(row, "publisher_id")?,
            edition_identifier: get(row, "edition_identifier")?,
            description: get(row, "description")?,
            release_date: get(row, "release_date")?,
            img: get(row, "img")?,
            url: get(row, "url")?,
        })
    }
}

impl PgCatalogFields for ProductFields {
    const COLUMNS: &'static [&'static str] = &[
        "edition_id",
        "title",
        "product_type",
        "sourcebook_type",
        "isbn",
        "release_date",
        "img",
        "url",
        "available_print",
        "available_digital",
    ];
    const ORDER_BY: &'static str = "(SELECT g.title FROM editions e JOIN games g ON g.id = e.game_id \
         WHERE e.id = t.edition_id), \
         (SELECT e.edition_identifier FROM editions e WHERE e.id = t.edition_id), \
         t.title, t.release_date, t.id";
    const LINKS: &'static [LinkTable] = &[
        LinkTable::new(
            "primary_author_ids",
            "product_primary_authors",
            "product_id",
            "author_id",
        ),
        LinkTable::new(
            "additional_author_ids",
            "product_additional_authors",
            "product_id",
            "author_id",
        ),
    ];

    fn to_columns(&self) -> Vec<ColumnValue> {
        vec![
            ColumnValue::Reference(Some(self.edition_id)),
            text(&self.title),
            code(Some(self.product_type)),
            code(self.sourcebook_type),
            opt_text(self.isbn.clone().map(String::from)),
            ColumnValue::Date(self.release_date),
            opt_text(self.img.clone()),
            opt_text(self.url.clone()),
            ColumnValue::Bool(self.available_print),
            ColumnValue::Bool(self.available_digital),
        ]
    }

    fn link_ids(&self) -> Vec<Vec<Uuid>> {
        vec![
            self.primary_author_ids.clone(),
            self.additional_author_ids.clone(),
        ]
    }

    fn from_row(row: &PgRow) -> DomainResult<Self> {
        let isbn: Option<String> = get(row, "isbn")?;
        Ok(Self {
            edition_id: get(row, "edition_id")?,
            title: get(row, "title")?,
            product_type: get_required_code(row, "product_type")?,
            sourcebook_type: get_code(row, "sourcebook_type")?,
            isbn: isbn.map(Isbn::new).transpose()?,
            release_date: get(row, "release_date")?,
            primary_author_ids: get(row, "primary_author_ids")?,
            additional_author_ids: get(row, "additional_author_ids")?,
            img: get(row, "img")?,
            url: get(row, "url")?,
            available_print: get(row, "available_print")?,
            available_digital: get(row, "available_digital")?,
        })
    }
}
