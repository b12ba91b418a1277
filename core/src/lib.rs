//! Channel desk: record keeping for sales-channel contacts, signed products,
//! revenue flows, settlement periods and payment collection.

pub mod auth;
pub mod config;
pub mod desk;
pub mod error;
pub mod form;
pub mod overview;
pub mod page;
pub mod record;
pub mod session;
pub mod store;
pub mod table;
pub mod types;
