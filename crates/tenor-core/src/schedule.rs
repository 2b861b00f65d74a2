//! Accrual schedule generation.
//!
//! A schedule splits `[start, end]` into accrual periods of a fixed tenor and
//! attaches a fixing date, a payment date and an accrual fraction to each.
//!
//! - Boundaries are stepped from an anchor as whole multiples of the tenor:
//!   from `end` backwards ([`DateGenerationRule::Backward`], the default) or
//!   from `start` forwards. Any stub lands at the other end.
//! - With the end-of-month flag, a monthly or yearly tenor and an anchor on
//!   its month's last business day, every inner boundary sits on the last
//!   business day of its month.
//! - All boundaries are rolled with the accrual convention and calendar.
//!
//! # Example
//!
//! ```rust
//! use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
//! use tenor_core::schedule::{Schedule, ScheduleConfig};
//! use tenor_core::types::{Date, Period};
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     Date::from_ymd(2024, 7, 15).unwrap(),
//!     Period::months(3),
//!     HolidayConvention::Usgs,
//!     BusinessDayConvention::ModifiedFollowing,
//!     AccrualBasis::Act360,
//! );
//!
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.len(), 2);
//! assert_eq!(schedule.rows()[0].start_date.to_string(), "2024-01-16");
//! ```

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendars::Calendar;
use crate::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Period, TimeUnit};

/// Direction in which period boundaries are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateGenerationRule {
    /// Step forward from the start date; any stub is at the end.
    Forward,
    /// Step backward from the end date; any stub is at the start.
    #[default]
    Backward,
}

impl DateGenerationRule {
    /// Token (`FORWARD` / `BACKWARD`).
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            DateGenerationRule::Forward => "FORWARD",
            DateGenerationRule::Backward => "BACKWARD",
        }
    }
}

impl fmt::Display for DateGenerationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DateGenerationRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FORWARD" => Ok(DateGenerationRule::Forward),
            "BACKWARD" => Ok(DateGenerationRule::Backward),
            _ => Err(CoreError::unknown_convention("date generation rule", s)),
        }
    }
}

impl TryFrom<String> for DateGenerationRule {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateGenerationRule> for String {
    fn from(value: DateGenerationRule) -> Self {
        value.token().to_string()
    }
}

/// Inputs for [`Schedule::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Start of the first accrual period (unadjusted).
    pub start_date: Date,
    /// End of the last accrual period (unadjusted).
    pub end_date: Date,
    /// Accrual tenor; must be positive.
    pub accrual_period: Period,
    /// Calendar for accrual boundaries and fixings.
    pub holiday_convention: HolidayConvention,
    /// Roll convention for accrual boundaries and fixings.
    pub business_day_convention: BusinessDayConvention,
    /// Day count for the accrual fraction.
    pub accrual_basis: AccrualBasis,
    /// Generation direction.
    pub rule: DateGenerationRule,
    /// Month-end stickiness.
    pub end_of_month: bool,
    /// Fix at the period end instead of the period start.
    pub fix_in_arrear: bool,
    /// Offset from the fixing boundary; `None` fixes on the boundary itself.
    pub fixing_offset: Option<Period>,
    /// Offset from the period end; `None` pays on the period end.
    pub payment_offset: Option<Period>,
    /// Roll convention for payment dates.
    pub payment_business_day_convention: BusinessDayConvention,
    /// Calendar for payment dates.
    pub payment_holiday_convention: HolidayConvention,
}

impl ScheduleConfig {
    /// Creates a configuration with the remaining inputs defaulted:
    /// backward generation, no month-end rule, fixing in advance with a `0D`
    /// offset, payment `0D` after the period end on `F`/`USGS`.
    #[must_use]
    pub fn new(
        start_date: Date,
        end_date: Date,
        accrual_period: Period,
        holiday_convention: HolidayConvention,
        business_day_convention: BusinessDayConvention,
        accrual_basis: AccrualBasis,
    ) -> Self {
        Self {
            start_date,
            end_date,
            accrual_period,
            holiday_convention,
            business_day_convention,
            accrual_basis,
            rule: DateGenerationRule::Backward,
            end_of_month: false,
            fix_in_arrear: false,
            fixing_offset: Some(Period::days(0)),
            payment_offset: Some(Period::days(0)),
            payment_business_day_convention: BusinessDayConvention::Following,
            payment_holiday_convention: HolidayConvention::Usgs,
        }
    }

    /// Sets the generation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: DateGenerationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }

    /// Fix at period end.
    #[must_use]
    pub fn with_fix_in_arrear(mut self, arrear: bool) -> Self {
        self.fix_in_arrear = arrear;
        self
    }

    /// Sets the fixing offset.
    #[must_use]
    pub fn with_fixing_offset(mut self, offset: Option<Period>) -> Self {
        self.fixing_offset = offset;
        self
    }

    /// Sets the payment offset.
    #[must_use]
    pub fn with_payment_offset(mut self, offset: Option<Period>) -> Self {
        self.payment_offset = offset;
        self
    }

    /// Sets the payment roll convention and calendar.
    #[must_use]
    pub fn with_payment_conventions(
        mut self,
        convention: BusinessDayConvention,
        holidays: HolidayConvention,
    ) -> Self {
        self.payment_business_day_convention = convention;
        self.payment_holiday_convention = holidays;
        self
    }
}

/// One accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Adjusted accrual start.
    pub start_date: Date,
    /// Adjusted accrual end.
    pub end_date: Date,
    /// Rate fixing date.
    pub fixing_date: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction.
    pub accrued: Decimal,
}

/// Contiguous accrual periods in date order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    /// Generates the schedule.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidSchedule` if `end_date <= start_date`
    /// - `CoreError::InvalidPeriod` if the accrual period is not positive
    /// - `CoreError::InvalidDate` if date arithmetic leaves the supported range
    pub fn generate(config: &ScheduleConfig) -> CoreResult<Self> {
        if config.end_date <= config.start_date {
            return Err(CoreError::invalid_schedule(format!(
                "end date {} must be after start date {}",
                config.end_date, config.start_date
            )));
        }
        if config.accrual_period.length() <= 0 {
            return Err(CoreError::invalid_period(
                config.accrual_period.to_string(),
                "accrual period must be positive",
            ));
        }

        let calendar = config.holiday_convention.calendar();
        let boundaries = Self::boundaries(config, calendar)?;

        let rows = boundaries
            .windows(2)
            .map(|w| Self::row(config, calendar, w[0], w[1]))
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(
            "generated {} accrual periods {}..{} every {} ({}, {})",
            rows.len(),
            config.start_date,
            config.end_date,
            config.accrual_period,
            config.rule,
            config.holiday_convention
        );

        Ok(Self { rows })
    }

    /// Adjusted period boundaries, first to last.
    fn boundaries(config: &ScheduleConfig, calendar: &dyn Calendar) -> CoreResult<Vec<Date>> {
        let bdc = config.business_day_convention;
        let (seed, exit, sign) = match config.rule {
            DateGenerationRule::Backward => (config.end_date, config.start_date, -1),
            DateGenerationRule::Forward => (config.start_date, config.end_date, 1),
        };
        let monthly = matches!(
            config.accrual_period.unit(),
            TimeUnit::Months | TimeUnit::Years
        );
        let end_of_month = config.end_of_month && monthly;
        let sticky = end_of_month && calendar.is_end_of_month(seed);

        let mut raw = vec![seed];
        for i in 1.. {
            let next = step(seed, config.accrual_period.times(sign * i)?, end_of_month)?;
            let beyond = match config.rule {
                DateGenerationRule::Backward => next < exit,
                DateGenerationRule::Forward => next > exit,
            };
            if beyond {
                break;
            }
            let last = raw[raw.len() - 1];
            if calendar.adjust(last, bdc) != calendar.adjust(next, bdc) {
                raw.push(next);
            }
        }
        let last = raw[raw.len() - 1];
        if calendar.adjust(last, bdc) != calendar.adjust(exit, bdc) {
            raw.push(exit);
        }
        if config.rule == DateGenerationRule::Backward {
            raw.reverse();
        }

        let n = raw.len();
        let mut dates: Vec<Date> = raw
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                if sticky && i > 0 && i < n - 1 {
                    calendar.end_of_month(date)
                } else {
                    calendar.adjust(date, bdc)
                }
            })
            .collect();

        // Month-end moves can push an inner boundary onto or past an end.
        if dates.len() > 2 && dates[dates.len() - 2] >= dates[dates.len() - 1] {
            let end = dates[dates.len() - 1];
            dates.pop();
            let len = dates.len();
            dates[len - 1] = end;
        }
        if dates.len() > 2 && dates[1] <= dates[0] {
            dates.remove(1);
        }

        if dates.len() < 2 || dates[0] >= dates[dates.len() - 1] {
            return Err(CoreError::invalid_schedule(format!(
                "{}..{} collapses to a single date on {}",
                config.start_date,
                config.end_date,
                calendar.name()
            )));
        }
        Ok(dates)
    }

    fn row(
        config: &ScheduleConfig,
        calendar: &dyn Calendar,
        start: Date,
        end: Date,
    ) -> CoreResult<ScheduleRow> {
        let bdc = config.business_day_convention;
        let fixing_anchor = if config.fix_in_arrear { end } else { start };
        let fixing_date = match config.fixing_offset {
            Some(offset) => calendar.advance(fixing_anchor, offset, bdc, false)?,
            None => fixing_anchor,
        };
        let payment_date = match config.payment_offset {
            Some(offset) => config.payment_holiday_convention.calendar().advance(
                end,
                offset,
                config.payment_business_day_convention,
                false,
            )?,
            None => end,
        };
        let accrued = config
            .accrual_basis
            .year_fraction(start, calendar.adjust(end, bdc));

        Ok(ScheduleRow {
            start_date: start,
            end_date: end,
            fixing_date,
            payment_date,
            accrued,
        })
    }

    /// The accrual periods.
    #[must_use]
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Consumes the schedule into its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<ScheduleRow> {
        self.rows
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a generated schedule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the periods in date order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Generates a schedule from positional inputs with the remaining options defaulted.
///
/// # Errors
///
/// See [`Schedule::generate`].
pub fn make_schedule(
    start_date: Date,
    end_date: Date,
    accrual_period: Period,
    holiday_convention: HolidayConvention,
    business_day_convention: BusinessDayConvention,
    accrual_basis: AccrualBasis,
    rule: DateGenerationRule,
) -> CoreResult<Schedule> {
    let config = ScheduleConfig::new(
        start_date,
        end_date,
        accrual_period,
        holiday_convention,
        business_day_convention,
        accrual_basis,
    )
    .with_rule(rule);
    Schedule::generate(&config)
}

/// Unadjusted calendar step from the anchor.
///
/// With `end_of_month`, an anchor on the calendar month end keeps landing on
/// month ends.
fn step(seed: Date, period: Period, end_of_month: bool) -> CoreResult<Date> {
    let n = period.length();
    match period.unit() {
        TimeUnit::Days => seed.add_days(i64::from(n)),
        TimeUnit::Weeks => seed.add_days(7 * i64::from(n)),
        TimeUnit::Months | TimeUnit::Years => {
            let months = if period.unit() == TimeUnit::Years {
                n.checked_mul(12)
                    .ok_or_else(|| CoreError::invalid_period(period.to_string(), "too many months"))?
            } else {
                n
            };
            let date = seed.add_months(months)?;
            if end_of_month && seed.is_end_of_month() {
                Ok(date.end_of_month())
            } else {
                Ok(date)
            }
        }
    }
}
