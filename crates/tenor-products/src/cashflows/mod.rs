//! Single-period cashflow products.

mod bullet;
mod fixed_accrued;
mod overnight;

pub use bullet::BulletCashflow;
pub use fixed_accrued::FixedAccruedCashflow;
pub use overnight::OvernightIndexCashflow;
