use super::CatalogQueryService;
use crate::{
    application::{
        dto::{CatalogEntryDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        catalog::{CatalogFields, CatalogListCursor},
        errors::DomainError,
    },
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListCatalogQuery {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl<F: CatalogFields> CatalogQueryService<F> {
    pub async fn list(
        &self,
        query: ListCatalogQuery,
    ) -> ApplicationResult<CursorPage<CatalogEntryDto<F>>> {
        let limit = normalize_limit(query.limit);
        let offset = decode_cursor(query.cursor.as_deref())?
            .map(|cursor| cursor.offset)
            .unwrap_or(0);

        let records = self.repo.list_page(limit + 1, offset).await?;
        let next_offset = offset + u64::from(limit);
        let page = CursorPage::from_overfetch(records, limit as usize, || {
            CatalogListCursor::new(next_offset).encode()
        });
        Ok(page.map(Into::into))
    }
}

fn normalize_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<CatalogListCursor>> {
    match token {
        Some(value) => match CatalogListCursor::decode(value) {
            Ok(cursor) => Ok(Some(cursor)),
            Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
            Err(other) => Err(ApplicationError::from(other)),
        },
        None => Ok(None),
    }
}
