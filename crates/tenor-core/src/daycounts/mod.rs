//! Day count conventions.
//!
//! A day count turns a pair of dates into an accrual year fraction.
//!
//! - [`Act360`], [`Act365Fixed`], [`ActActIsda`]: actual-day numerators
//! - [`Thirty360Isda`]: 30-day months with February month-end rules
//! - [`SimpleDayCount`]: whole months over twelve, 30/360 otherwise
//! - [`Business252`]: business days over 252
//!
//! ```rust
//! use tenor_core::daycounts::{Act360, DayCount};
//! use tenor_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
//! ```

mod actual;
mod business252;
mod simple;
mod thirty360;

pub use actual::{Act360, Act365Fixed, ActActIsda};
pub use business252::Business252;
pub use simple::SimpleDayCount;
pub use thirty360::Thirty360Isda;

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for day count conventions.
///
/// Year fractions are signed: swapping the dates flips the sign.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under the convention's day rules.
    fn day_count(&self, start: Date, end: Date) -> i64;
}
