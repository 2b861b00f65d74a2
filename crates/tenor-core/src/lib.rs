//! # Tenor Core
//!
//! Dates, calendars, day counts, market conventions and schedule generation
//! for the Tenor fixed income workspace.
//!
//! - **Types**: `Date`, `Period`, `TermOrDate`, `Currency`
//! - **Calendars**: rule-built holiday tables for NYC, USGS, LON, TOK, TARGET and SYD
//! - **Day Counts**: ACT/360, ACT/365 Fixed, ACT/ACT ISDA, 30/360 ISDA, simple, business/252
//! - **Conventions**: token resolution (`USGS`, `ACT/360`, `MF`, ...)
//! - **Schedule**: accrual periods with fixing and payment dates
//!
//! ## Example
//!
//! ```rust
//! use tenor_core::prelude::*;
//!
//! let schedule = make_schedule(
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     Date::from_ymd(2024, 7, 15).unwrap(),
//!     "3M".parse().unwrap(),
//!     "USGS".parse().unwrap(),
//!     "MF".parse().unwrap(),
//!     "ACT/360".parse().unwrap(),
//!     DateGenerationRule::Backward,
//! )
//! .unwrap();
//! assert_eq!(schedule.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod conventions;
pub mod dates;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar};
    pub use crate::conventions::{AccrualBasis, HolidayConvention};
    pub use crate::daycounts::DayCount;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{
        make_schedule, DateGenerationRule, Schedule, ScheduleConfig, ScheduleRow,
    };
    pub use crate::types::{Currency, Date, Period, TermOrDate, TimeUnit};
}
