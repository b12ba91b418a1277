//! Record types, one tagged variant per collection.
//!
//! RULE: Records are only ever appended. There is no update or delete path,
//! so derived values (the flow share) are computed once, at construction.

use crate::types::{Amount, REVENUE_SHARE_RATE};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The five persisted collections, one CSV file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Channels,
    Products,
    Flows,
    Settlements,
    Payments,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Channels,
        Collection::Products,
        Collection::Flows,
        Collection::Settlements,
        Collection::Payments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Channels    => "channels",
            Self::Products    => "products",
            Self::Flows       => "flows",
            Self::Settlements => "settlements",
            Self::Payments    => "payments",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Channels    => "channels.csv",
            Self::Products    => "products.csv",
            Self::Flows       => "flows.csv",
            Self::Settlements => "settlements.csv",
            Self::Payments    => "payments.csv",
        }
    }

    /// Column headers written for records of this collection.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Channels    => &["name", "contact", "phone"],
            Self::Products    => &["name", "channel", "start_date", "end_date"],
            Self::Flows       => &["channel", "date", "revenue_amount", "share_amount"],
            Self::Settlements => &["channel", "period", "amount", "status"],
            Self::Payments    => &["channel", "amount", "date"],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Channel {
    pub name: String,
    pub contact: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub channel: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Flow {
    pub channel: String,
    pub date: NaiveDate,
    pub revenue_amount: Amount,
    share_amount: Amount,
}

impl Flow {
    /// The share is fixed at construction; there is no other way to set it.
    pub fn new(channel: String, date: NaiveDate, revenue_amount: Amount) -> Self {
        Self {
            channel,
            date,
            revenue_amount,
            share_amount: revenue_amount * REVENUE_SHARE_RATE,
        }
    }

    pub fn share_amount(&self) -> Amount {
        self.share_amount
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Pending,
    Settled,
}

impl SettlementStatus {
    pub const ALL: [SettlementStatus; 2] = [SettlementStatus::Pending, SettlementStatus::Settled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Settled => "settled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Settled => "Settled",
        }
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "settled" => Ok(Self::Settled),
            other => Err(format!("expected 'pending' or 'settled', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Settlement {
    pub channel: String,
    pub period: String,
    pub amount: Amount,
    pub status: SettlementStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Payment {
    pub channel: String,
    pub amount: Amount,
    pub date: NaiveDate,
}

/// One new row for one collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "collection", rename_all = "snake_case")]
pub enum DeskRecord {
    Channel(Channel),
    Product(Product),
    Flow(Flow),
    Settlement(Settlement),
    Payment(Payment),
}

impl DeskRecord {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Channel(_)    => Collection::Channels,
            Self::Product(_)    => Collection::Products,
            Self::Flow(_)       => Collection::Flows,
            Self::Settlement(_) => Collection::Settlements,
            Self::Payment(_)    => Collection::Payments,
        }
    }

    /// The record as (column, cell) pairs, in the collection's column order.
    pub fn cells(&self) -> Vec<(&'static str, String)> {
        let values = match self {
            Self::Channel(c) => vec![c.name.clone(), c.contact.clone(), c.phone.clone()],
            Self::Product(p) => vec![
                p.name.clone(),
                p.channel.clone(),
                format_date(p.start_date),
                format_date(p.end_date),
            ],
            Self::Flow(f) => vec![
                f.channel.clone(),
                format_date(f.date),
                format_amount(f.revenue_amount),
                format_amount(f.share_amount),
            ],
            Self::Settlement(s) => vec![
                s.channel.clone(),
                s.period.clone(),
                format_amount(s.amount),
                s.status.to_string(),
            ],
            Self::Payment(p) => vec![p.channel.clone(), format_amount(p.amount), format_date(p.date)],
        };
        self.collection().columns().iter().copied().zip(values).collect()
    }
}

/// Shortest representation that parses back to the same `f64`.
pub fn format_amount(amount: Amount) -> String {
    format!("{amount}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_share_is_thirty_percent_of_revenue() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for revenue in [0.0, 1.0, 99.99, 1234.5, 1e9] {
            let flow = Flow::new("Acme".into(), date, revenue);
            assert_eq!(flow.share_amount(), revenue * 0.3);
        }
    }

    #[test]
    fn cells_follow_collection_columns() {
        let record = DeskRecord::Payment(Payment {
            channel: "Acme".into(),
            amount: 250.5,
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        });
        let cells = record.cells();
        let names: Vec<_> = cells.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, Collection::Payments.columns());
        assert_eq!(cells[1].1, "250.5");
        assert_eq!(cells[2].1, "2024-01-31");
    }

    #[test]
    fn persisted_amount_parses_back_exactly() {
        let flow = Flow::new("Acme".into(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 33.33);
        let cells = DeskRecord::Flow(flow.clone()).cells();
        let share: f64 = cells[3].1.parse().unwrap();
        assert_eq!(share, flow.share_amount());
    }

    #[test]
    fn settlement_status_parses_case_insensitively() {
        assert_eq!("Settled".parse::<SettlementStatus>(), Ok(SettlementStatus::Settled));
        assert_eq!(" pending ".parse::<SettlementStatus>(), Ok(SettlementStatus::Pending));
        assert!("paid".parse::<SettlementStatus>().is_err());
    }
}
