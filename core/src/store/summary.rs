//! Read-only aggregate queries used by the overview page.

use super::DeskStore;
use crate::{
    error::DeskResult,
    record::{Collection, SettlementStatus},
    types::Amount,
};

/// Sum of one amount column for one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTotal {
    pub channel: String,
    pub amount: Amount,
}

impl DeskStore {
    pub fn row_count(&self, collection: Collection) -> DeskResult<usize> {
        Ok(self.load(collection)?.len())
    }

    /// Sum of a numeric column. An absent collection sums to zero.
    pub fn column_total(&self, collection: Collection, column: &str) -> DeskResult<Amount> {
        let table = self.load(collection)?;
        if table.is_empty() {
            return Ok(0.0);
        }
        Ok(table.amounts(collection, column)?.iter().sum())
    }

    /// (date, revenue) per flow row, in file order.
    pub fn revenue_trend(&self) -> DeskResult<Vec<(String, Amount)>> {
        let collection = Collection::Flows;
        let table = self.load(collection)?;
        if table.is_empty() {
            return Ok(Vec::new());
        }
        let revenue = table.amounts(collection, "revenue_amount")?;
        let dates = table.column(collection, "date")?;
        Ok(dates.map(str::to_string).zip(revenue).collect())
    }

    /// Collected amount per channel, channels in first-seen order.
    pub fn collections_by_channel(&self) -> DeskResult<Vec<ChannelTotal>> {
        let collection = Collection::Payments;
        let table = self.load(collection)?;
        if table.is_empty() {
            return Ok(Vec::new());
        }
        let amounts = table.amounts(collection, "amount")?;
        let mut totals: Vec<ChannelTotal> = Vec::new();
        for (channel, amount) in table.column(collection, "channel")?.zip(amounts) {
            match totals.iter_mut().find(|t| t.channel == channel) {
                Some(total) => total.amount += amount,
                None => totals.push(ChannelTotal {
                    channel: channel.to_string(),
                    amount,
                }),
            }
        }
        Ok(totals)
    }

    /// Settlement amounts split by status. Rows with an unrecognised status
    /// count toward neither side.
    pub fn settlement_totals(&self) -> DeskResult<(Amount, Amount)> {
        let collection = Collection::Settlements;
        let table = self.load(collection)?;
        if table.is_empty() {
            return Ok((0.0, 0.0));
        }
        let amounts = table.amounts(collection, "amount")?;
        let mut pending = 0.0;
        let mut settled = 0.0;
        for (status, amount) in table.column(collection, "status")?.zip(amounts) {
            match status.parse::<SettlementStatus>() {
                Ok(SettlementStatus::Pending) => pending += amount,
                Ok(SettlementStatus::Settled) => settled += amount,
                Err(_) => log::debug!("settlements: ignoring status '{status}'"),
            }
        }
        Ok((pending, settled))
    }
}
