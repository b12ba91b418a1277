//! Shared primitive types used across the desk.

/// A money amount. Always finite and non-negative once it passes form coercion.
pub type Amount = f64;

/// Stable identifier of a browser session.
pub type SessionId = uuid::Uuid;

/// Fraction of a channel's revenue owed as its share.
pub const REVENUE_SHARE_RATE: f64 = 0.3;
