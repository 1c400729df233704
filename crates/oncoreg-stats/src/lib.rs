//! Statistical helpers for the registry dashboard.
//!
//! This crate is free of registry-specific types. It provides:
//!
//! - **Rates**: Guarded ratios and percentages that never divide by zero
//! - **Descriptive statistics**: Mean, median, minimum and maximum of a dataset
//! - **Threshold survival curves**: "Percent surviving at least X months" series
//!
//! # Modules
//!
//! - [`rate`]: Percentages, rounding and divide-by-zero guards
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`survival`]: Threshold survival curves with optional optimistic censoring
//!
//! # Examples
//!
//! ## Computing a guarded percentage
//!
//! ```
//! use oncoreg_stats::rate;
//!
//! assert_eq!(rate::percentage(1, 4), 25.0);
//! assert_eq!(rate::percentage(3, 0), 0.0);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use oncoreg_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Building a survival curve
//!
//! ```
//! use oncoreg_stats::survival::ThresholdSurvivalCurve;
//!
//! let durations = [6.0, 18.0, 30.0, 42.0];
//! let curve = ThresholdSurvivalCurve::from_durations(&durations, &[0.0, 12.0, 24.0]);
//! assert_eq!(curve.percent_at(12.0), Some(75.0));
//! ```

pub mod descriptive;
pub mod rate;
pub mod survival;
