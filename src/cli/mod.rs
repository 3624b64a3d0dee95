pub mod cache;
pub mod fetch;
pub mod quote;
pub mod receive;
pub mod schedule;
pub mod setup;
pub mod sync;
pub mod ui;
