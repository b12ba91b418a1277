//! Dashboard data: two charts and a strip of headline totals.

use crate::{
    error::DeskResult,
    record::Collection,
    store::DeskStore,
    types::Amount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One chart: labelled points along a categorical x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<(String, Amount)>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_value(&self) -> Amount {
        self.points.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeskTotals {
    pub channels: usize,
    pub products: usize,
    pub revenue: Amount,
    pub share: Amount,
    pub settlement_pending: Amount,
    pub settlement_settled: Amount,
    pub collected: Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub revenue_trend: ChartSeries,
    pub collections: ChartSeries,
    pub totals: DeskTotals,
}

impl Overview {
    pub fn gather(store: &DeskStore) -> DeskResult<Self> {
        let revenue_trend = ChartSeries {
            title: "Channel revenue trend",
            kind: ChartKind::Line,
            x_label: "date",
            y_label: "revenue_amount",
            points: store.revenue_trend()?,
        };
        let collections = ChartSeries {
            title: "Payment collection",
            kind: ChartKind::Bar,
            x_label: "channel",
            y_label: "amount",
            points: store
                .collections_by_channel()?
                .into_iter()
                .map(|t| (t.channel, t.amount))
                .collect(),
        };

        let (settlement_pending, settlement_settled) = store.settlement_totals()?;
        let totals = DeskTotals {
            channels: store.row_count(Collection::Channels)?,
            products: store.row_count(Collection::Products)?,
            revenue: revenue_trend.points.iter().map(|(_, v)| v).sum(),
            share: store.column_total(Collection::Flows, "share_amount")?,
            settlement_pending,
            settlement_settled,
            collected: collections.points.iter().map(|(_, v)| v).sum(),
        };

        Ok(Self {
            revenue_trend,
            collections,
            totals,
        })
    }
}
