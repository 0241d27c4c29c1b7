use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_SYSTEM_TITLE: &str = "game_systems_title_key";
const SLUG_CONSTRAINT_SUFFIX: &str = "_slug_key";
const FOREIGN_KEY_SUFFIX: &str = "_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => db_err
            .constraint()
            .and_then(classify_constraint)
            .or_else(|| db_err.code().and_then(|code| classify_sqlstate(&code)))
            .unwrap_or_else(|| DomainError::Persistence(db_err.message().to_string())),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Like [`map_sqlx`] but names the slug that lost a uniqueness race.
pub fn map_sqlx_for_slug(slug: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |err| match map_sqlx(err) {
        DomainError::DuplicateSlug(_) => DomainError::DuplicateSlug(slug.to_string()),
        other => other,
    }
}

/// Errors for constraints the schema names. `None` leaves the decision to
/// the SQLSTATE.
fn classify_constraint(constraint: &str) -> Option<DomainError> {
    match constraint {
        CNT_USER_USERNAME => Some(DomainError::Conflict("username already exists".into())),
        CNT_SYSTEM_TITLE => Some(DomainError::Conflict(
            "a game system with this title already exists".into(),
        )),
        slug if slug.ends_with(SLUG_CONSTRAINT_SUFFIX) => Some(DomainError::DuplicateSlug(
            slug.trim_end_matches(SLUG_CONSTRAINT_SUFFIX).to_string(),
        )),
        fk if fk.ends_with(FOREIGN_KEY_SUFFIX) => Some(DomainError::Validation(format!(
            "referenced record does not exist ({fk})"
        ))),
        _ => None,
    }
}

fn classify_sqlstate(code: &str) -> Option<DomainError> {
    match code {
        "23505" => Some(DomainError::Conflict("unique constraint violated".into())),
        "23503" => Some(DomainError::Validation(
            "referenced record does not exist".into(),
        )),
        "23514" => Some(DomainError::Validation("check constraint violated".into())),
        _ => None,
    }
}
