//! The desk: config, store and gate wired together behind page-level calls.
//!
//! RULES:
//!   - Every view reloads its collection from disk; nothing is cached.
//!   - A submission is coerced fully before the store is touched, so a
//!     rejected form never rewrites a file.

use crate::{
    auth::AuthGate,
    config::DeskConfig,
    error::{DeskError, DeskResult},
    form::FormFields,
    overview::Overview,
    page::Page,
    record::{Collection, DeskRecord},
    session::Session,
    store::DeskStore,
    table::Table,
};

/// What a page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Overview(Overview),
    Collection { collection: Collection, table: Table },
}

/// Outcome of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: DeskRecord,
    pub table: Table,
}

pub struct Desk {
    pub config: DeskConfig,
    pub store: DeskStore,
    gate: AuthGate,
}

impl Desk {
    /// Build a desk from `config`, creating its data directory.
    pub fn build(config: DeskConfig) -> DeskResult<Self> {
        let store = DeskStore::open(&config.data_dir)?;
        log::info!("desk: data directory {}", store.data_dir().display());
        Ok(Self {
            config,
            store,
            gate: AuthGate::default(),
        })
    }

    pub fn login(&self, session: &mut Session, password: &str) -> bool {
        session.submit_password(&self.gate, password)
    }

    pub fn view(&self, page: Page) -> DeskResult<PageView> {
        match page.collection() {
            None => Ok(PageView::Overview(Overview::gather(&self.store)?)),
            Some(collection) => Ok(PageView::Collection {
                collection,
                table: self.store.load(collection)?,
            }),
        }
    }

    /// Append the record described by `fields` to the page's collection.
    pub fn submit(&self, page: Page, fields: &FormFields) -> DeskResult<Submission> {
        let collection = page.collection().ok_or_else(|| {
            DeskError::Other(anyhow::anyhow!("page '{}' has no form", page.slug()))
        })?;
        let record = DeskRecord::from_form(collection, fields)?;
        let table = self.store.append(&record)?;
        Ok(Submission { record, table })
    }
}
