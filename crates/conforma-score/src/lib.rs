//! # conforma-score -- Compliance Scoring
//!
//! Pure functions turning a [`Project`](conforma_core::Project) aggregate
//! into completion figures:
//!
//! - [`compute_theme_stats`]: percentage of concluded requirements in one
//!   theme, with its [`ProgressColor`].
//! - [`compute_project_stats`]: one [`ThemeStats`] per theme, in the
//!   project's theme order.
//! - [`compute_overall_stats`]: the same figures over the flattened
//!   requirement set of the whole project.
//!
//! Nothing here is cached. Callers recompute from the latest aggregate
//! every time they render, so a stale score can only come from a stale
//! aggregate.
//!
//! ```text
//! percentage = round(100 * concluded / total)     (0 when total = 0)
//!
//!   0 ..= 39  → Red
//!  40 ..= 90  → Yellow
//!  91 ..= 100 → Green
//! ```

pub mod color;
pub mod stats;

pub use color::ProgressColor;
pub use stats::{
    compute_overall_stats, compute_project_stats, compute_theme_stats, percentage, OverallStats,
    ThemeStats,
};
