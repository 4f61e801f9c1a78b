//! Retirement planning: immediate annuities, single-sum growth to a
//! retirement age, and the time left until retirement.

pub mod annuity;
pub mod countdown;
pub mod projection;
