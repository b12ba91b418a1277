//! Form descriptors and coercion of submitted fields into records.

use crate::{
    error::{DeskError, DeskResult},
    record::{Channel, Collection, DeskRecord, Flow, Payment, Product, Settlement, SettlementStatus},
    types::Amount,
};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// A number with a lower bound of zero.
    Amount,
    Date,
    Status,
}

/// One input of an entity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FormField {
    FormField { name, label, kind }
}

impl Collection {
    /// Inputs shown on this collection's "add" form, in display order.
    /// The flow share is derived, so it has no input.
    pub fn form_fields(self) -> &'static [FormField] {
        const CHANNEL: &[FormField] = &[
            field("name", "Channel name", FieldKind::Text),
            field("contact", "Contact", FieldKind::Text),
            field("phone", "Phone", FieldKind::Text),
        ];
        const PRODUCT: &[FormField] = &[
            field("name", "Product name", FieldKind::Text),
            field("channel", "Signed channel", FieldKind::Text),
            field("start_date", "Start date", FieldKind::Date),
            field("end_date", "End date", FieldKind::Date),
        ];
        const FLOW: &[FormField] = &[
            field("channel", "Channel", FieldKind::Text),
            field("date", "Date", FieldKind::Date),
            field("revenue_amount", "Revenue", FieldKind::Amount),
        ];
        const SETTLEMENT: &[FormField] = &[
            field("channel", "Channel", FieldKind::Text),
            field("period", "Billing period", FieldKind::Text),
            field("amount", "Settlement amount", FieldKind::Amount),
            field("status", "Status", FieldKind::Status),
        ];
        const PAYMENT: &[FormField] = &[
            field("channel", "Channel", FieldKind::Text),
            field("amount", "Amount collected", FieldKind::Amount),
            field("date", "Collection date", FieldKind::Date),
        ];
        match self {
            Self::Channels    => CHANNEL,
            Self::Products    => PRODUCT,
            Self::Flows       => FLOW,
            Self::Settlements => SETTLEMENT,
            Self::Payments    => PAYMENT,
        }
    }
}

/// Raw submitted fields, name to string value.
#[derive(Debug, Clone, Default)]
pub struct FormFields(HashMap<String, String>);

impl From<HashMap<String, String>> for FormFields {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl FormFields {
    fn raw(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Free text, stored exactly as submitted.
    pub fn text(&self, name: &str) -> String {
        self.raw(name).to_string()
    }

    /// Input for the typed kinds, which ignore surrounding whitespace.
    fn trimmed(&self, name: &str) -> &str {
        self.raw(name).trim()
    }

    /// A finite number `>= 0`. Empty input means zero.
    pub fn amount(&self, name: &str) -> DeskResult<Amount> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Ok(0.0);
        }
        let value: f64 = raw
            .parse()
            .map_err(|_| DeskError::invalid_field(name, format!("'{raw}' is not a number")))?;
        if !value.is_finite() {
            return Err(DeskError::invalid_field(name, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(DeskError::invalid_field(name, "must not be negative"));
        }
        Ok(value)
    }

    pub fn date(&self, name: &str) -> DeskResult<NaiveDate> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Err(DeskError::invalid_field(name, "a date is required"));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| DeskError::invalid_field(name, format!("'{raw}' is not a YYYY-MM-DD date")))
    }

    pub fn status(&self, name: &str) -> DeskResult<SettlementStatus> {
        self.trimmed(name)
            .parse()
            .map_err(|reason: String| DeskError::invalid_field(name, reason))
    }
}

impl DeskRecord {
    /// Build the record a form for `collection` describes.
    pub fn from_form(collection: Collection, fields: &FormFields) -> DeskResult<Self> {
        let record = match collection {
            Collection::Channels => Self::Channel(Channel {
                name: fields.text("name"),
                contact: fields.text("contact"),
                phone: fields.text("phone"),
            }),
            Collection::Products => Self::Product(Product {
                name: fields.text("name"),
                channel: fields.text("channel"),
                start_date: fields.date("start_date")?,
                end_date: fields.date("end_date")?,
            }),
            Collection::Flows => Self::Flow(Flow::new(
                fields.text("channel"),
                fields.date("date")?,
                fields.amount("revenue_amount")?,
            )),
            Collection::Settlements => Self::Settlement(Settlement {
                channel: fields.text("channel"),
                period: fields.text("period"),
                amount: fields.amount("amount")?,
                status: fields.status("status")?,
            }),
            Collection::Payments => Self::Payment(Payment {
                channel: fields.text("channel"),
                amount: fields.amount("amount")?,
                date: fields.date("date")?,
            }),
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_form_field_is_a_collection_column() {
        for collection in Collection::ALL {
            for f in collection.form_fields() {
                assert!(
                    collection.columns().contains(&f.name),
                    "{} form field {} is not a column",
                    collection.name(),
                    f.name
                );
            }
        }
    }

    #[test]
    fn channel_text_is_kept_verbatim() {
        let fields: FormFields = [("name", "Acme"), ("contact", " Jane "), ("phone", "555-0100")]
            .into_iter()
            .collect();
        let record = DeskRecord::from_form(Collection::Channels, &fields).unwrap();
        assert_eq!(
            record,
            DeskRecord::Channel(Channel {
                name: "Acme".into(),
                contact: " Jane ".into(),
                phone: "555-0100".into(),
            })
        );
    }

    #[test]
    fn typed_fields_ignore_surrounding_whitespace() {
        let fields: FormFields = [("amount", " 12.5 "), ("date", " 2024-05-01\n"), ("status", " Pending ")]
            .into_iter()
            .collect();
        assert_eq!(fields.amount("amount").unwrap(), 12.5);
        assert_eq!(fields.date("date").unwrap(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(fields.status("status").unwrap(), SettlementStatus::Pending);
    }

    #[test]
    fn missing_text_fields_become_empty() {
        let fields = FormFields::default();
        let record = DeskRecord::from_form(Collection::Channels, &fields).unwrap();
        let DeskRecord::Channel(channel) = record else {
            panic!("expected a channel record");
        };
        assert!(channel.name.is_empty() && channel.phone.is_empty());
    }

    #[test]
    fn flow_share_is_derived_from_revenue() {
        let fields: FormFields = [("channel", "Acme"), ("date", "2024-05-01"), ("revenue_amount", "1000")]
            .into_iter()
            .collect();
        let DeskRecord::Flow(flow) = DeskRecord::from_form(Collection::Flows, &fields).unwrap() else {
            panic!("expected a flow record");
        };
        assert_eq!(flow.revenue_amount, 1000.0);
        assert_eq!(flow.share_amount(), 1000.0 * 0.3);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let fields: FormFields = [("channel", "Acme"), ("amount", "-5"), ("date", "2024-05-01")]
            .into_iter()
            .collect();
        let err = DeskRecord::from_form(Collection::Payments, &fields).unwrap_err();
        assert!(err.is_user_input());
        assert!(err.to_string().contains("amount"), "got {err}");
    }

    #[test]
    fn non_numeric_and_infinite_amounts_are_rejected() {
        let fields: FormFields = [("amount", "abc")].into_iter().collect();
        assert!(fields.amount("amount").is_err());
        let fields: FormFields = [("amount", "inf")].into_iter().collect();
        assert!(fields.amount("amount").is_err());
        let fields: FormFields = [("amount", "")].into_iter().collect();
        assert_eq!(fields.amount("amount").unwrap(), 0.0);
    }

    #[test]
    fn dates_must_be_iso() {
        let fields: FormFields = [("date", "05/01/2024")].into_iter().collect();
        assert!(fields.date("date").is_err());
        let fields = FormFields::default();
        assert!(fields.date("date").is_err());
    }

    #[test]
    fn settlement_status_is_a_fixed_choice() {
        let mut fields: FormFields = [
            ("channel", "Acme"),
            ("period", "2024-Q1"),
            ("amount", "10"),
            ("status", "settled"),
        ]
        .into_iter()
        .collect();
        let DeskRecord::Settlement(s) = DeskRecord::from_form(Collection::Settlements, &fields).unwrap() else {
            panic!("expected a settlement record");
        };
        assert_eq!(s.status, SettlementStatus::Settled);

        fields.0.insert("status".into(), "overdue".into());
        assert!(DeskRecord::from_form(Collection::Settlements, &fields).is_err());
    }
}
