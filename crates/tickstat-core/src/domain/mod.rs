//! # Domain Models
//!
//! Canonical domain types for tickstat price series.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`DateRange`] | Inclusive calendar range of a fetch |
//! | [`PricePoint`] | Closing price on one trading day |
//! | [`LogReturn`] | Log return ending on a trading day |
//! | [`DailyCloses`] | Ordered closing prices for one symbol |
//! | [`Frequency`] | Resampling period (daily through yearly) |
//!
//! Every type validates its invariants at construction time, so a
//! [`PricePoint`] always carries a finite, strictly positive close.

mod date_range;
mod frequency;
mod price;
mod symbol;

pub use date_range::{parse_date, DateRange};
pub use frequency::Frequency;
pub use price::{DailyCloses, LogReturn, PricePoint};
pub use symbol::Symbol;
