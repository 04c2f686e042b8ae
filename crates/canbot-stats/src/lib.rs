//! Statistical utilities for the canbot project.
//!
//! Currently a single module:
//!
//! - [`descriptive`]: descriptive statistics for summarizing score samples
//!
//! # Example
//!
//! ```
//! use canbot_stats::descriptive::ScoreStats;
//!
//! let scores = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = ScoreStats::new(scores).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
