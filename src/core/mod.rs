pub mod aggregate;
pub mod catalog;
pub mod logging;
pub mod metrics;
pub mod profile;
pub mod query;
pub mod recommend;
pub mod store;
pub mod totals;
