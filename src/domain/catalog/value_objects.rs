// src/domain/catalog/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use url::{Host, Url};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub Uuid);

impl CatalogId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<CatalogId> for Uuid {
    fn from(value: CatalogId) -> Self {
        value.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The seven collections of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    GameLicense,
    Publisher,
    Author,
    GameSystem,
    Game,
    Edition,
    Product,
}

impl CatalogKind {
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::GameLicense => "game_licenses",
            CatalogKind::Publisher => "publishers",
            CatalogKind::Author => "authors",
            CatalogKind::GameSystem => "game_systems",
            CatalogKind::Game => "games",
            CatalogKind::Edition => "editions",
            CatalogKind::Product => "products",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::GameLicense => "game license",
            CatalogKind::Publisher => "publisher",
            CatalogKind::Author => "author",
            CatalogKind::GameSystem => "game system",
            CatalogKind::Game => "game",
            CatalogKind::Edition => "edition",
            CatalogKind::Product => "product",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A code/label pair from one of the fixed choice sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

macro_rules! choice_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn choices() -> Vec<Choice> {
                Self::ALL
                    .iter()
                    .map(|item| Choice {
                        code: item.as_str(),
                        label: item.label(),
                    })
                    .collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(DomainError::Validation(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

choice_set! {
    SourcebookType {
        Corebook => ("core", "Corebook"),
        Bestiary => ("bestiary", "Bestiary"),
        GmGuide => ("gm_guide", "GM Guide"),
        Adventure => ("adventure", "Adventure or Campaign"),
        Setting => ("setting", "Setting guide"),
        Fiction => ("fiction", "Tie-in Fiction"),
        Expanded => ("expanded", "Expanded rules for game."),
    }
}

choice_set! {
    CardSet {
        StandardDeck => ("s52", "52 Standard Playing Cards - Jokers removed"),
        JokerDeck => ("sjk", "Standard Playing Cards with Jokers included"),
        TarotDeck => ("tarot", "Tarot Deck"),
        CustomDeck => ("cust", "Custom set of cards for game."),
        CustomDeckOptional => ("copt", "Custom deck of cards for game with option to substitute standard cards."),
    }
}

choice_set! {
    DiceSet {
        PolyhedralArray => ("poly", "Standard array: d20, d10, d100, d12, d8, d6, d4"),
        D4 => ("d4", "D4s only."),
        TwoD6 => ("2d6", "2d6"),
        D6 => ("d6", "D6s only."),
        D8 => ("d8", "D8s only."),
        D10 => ("d10", "D10s only."),
        D12 => ("d12", "D12s only."),
        D20 => ("d20", "D20s only."),
        D100 => ("d100", "D100s only."),
        CypherSet => ("cypher", "Cypher array: d20, d100, d6"),
        Fate => ("fate", "Fate or Fudge Dice"),
        Genesys => ("genesys", "Genesys Narrative Dice"),
    }
}

choice_set! {
    ProductType {
        Sourcebook => ("book", "Source Book"),
        Accessory => ("accessory", "Accessory"),
        GameBox => ("box", "Game Box"),
    }
}

choice_set! {
    Mechanic {
        Dice => ("dice", "Dice"),
        Card => ("card", "Cards"),
        Custom => ("custom", "Other custom mechanic"),
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Sourcebook
    }
}

impl Default for Mechanic {
    fn default() -> Self {
        Mechanic::Dice
    }
}

/// ISBN-10 or ISBN-13, stored without separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let valid = match normalized.len() {
            10 => isbn10_checksum_ok(&normalized),
            13 => isbn13_checksum_ok(&normalized),
            _ => false,
        };

        if valid {
            Ok(Self(normalized))
        } else {
            Err(DomainError::Validation(format!("'{value}' is not a valid ISBN")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn isbn10_checksum_ok(digits: &str) -> bool {
    let mut sum = 0u32;
    for (idx, c) in digits.chars().enumerate() {
        let value = match (idx, c) {
            (9, 'X') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += (10 - idx as u32) * value;
    }
    sum % 11 == 0
}

fn isbn13_checksum_ok(digits: &str) -> bool {
    let mut sum = 0u32;
    for (idx, c) in digits.chars().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if idx % 2 == 0 { d } else { d * 3 };
    }
    sum % 10 == 0
}

impl TryFrom<String> for Isbn {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Isbn::new(value)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn require_text(field: &str, value: &str, max_chars: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    check_length(field, value, max_chars)
}

pub(crate) fn check_optional_text(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> DomainResult<()> {
    match value {
        Some(value) => check_length(field, value, max_chars),
        None => Ok(()),
    }
}

fn check_length(field: &str, value: &str, max_chars: usize) -> DomainResult<()> {
    if value.chars().count() > max_chars {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

const URL_MAX_LENGTH: usize = 200;

pub(crate) fn check_url(field: &str, value: Option<&str>) -> DomainResult<()> {
    let Some(raw) = value else {
        return Ok(());
    };
    let invalid = || DomainError::Validation(format!("{field} must be an absolute http(s) URL"));

    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match parsed.host() {
        Some(Host::Domain(domain)) if is_valid_domain(domain) => {}
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => {}
        _ => return Err(invalid()),
    }
    check_length(field, raw, URL_MAX_LENGTH)
}

/// Hostname labels after IDNA mapping: 1-63 ASCII letters, digits or inner hyphens.
fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
