//! Coverage simulations for proportion confidence intervals.
//!
//! This crate repeatedly samples from a known binomial distribution and checks
//! how often each [`IntervalMethod`](propstat_stats::IntervalMethod) captures
//! the true proportion. It shows empirically why the Wilson interval is
//! preferred over the Wald interval for small samples.
//!
//! # Overview
//!
//! ```text
//! CoverageConfig (trials, proportion, confidence, seed)
//!     ↓ seeds
//! Pcg32 → Binomial(trials, proportion) draws
//!     ↓ evaluated by
//! Wald / Wilson estimators (propstat-stats)
//!     ↓ summarized as
//! CoverageReport (coverage, width statistics, out-of-range count)
//! ```
//!
//! # Examples
//!
//! ```
//! use propstat_sim::{CoverageConfig, simulate_coverage};
//!
//! let config = CoverageConfig::from_json(
//!     r#"{ "trials": 20, "proportion": 0.05, "replications": 1000 }"#,
//! )
//! .unwrap();
//! let report = simulate_coverage(&config).unwrap();
//!
//! for method in &report.methods {
//!     println!("{}: {:.3}", method.method, method.coverage());
//! }
//! ```

pub use self::{config::*, coverage::*, seed::*};

mod config;
pub mod coverage;
mod seed;
