//! Domain value types: dates, periods, maturities and currencies.

mod currency;
mod date;
mod period;
mod term;

pub use currency::Currency;
pub use date::Date;
pub use period::{Period, TimeUnit};
pub use term::TermOrDate;
