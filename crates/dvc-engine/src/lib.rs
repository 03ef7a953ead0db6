//! Visibility resolution for layered diagram elements.
//!
//! Data flows leaf-first through the modules of this crate:
//!
//! - [`filter`]: ids matched by one filter
//! - [`resolver`]: ids claimed by one layer (AND of its filters)
//! - [`assignment`]: per-layer buckets, first claim wins by priority
//! - [`policy`]: buckets to the visible id set
//!
//! [`VisibilityEngine`] runs the whole pipeline with the configured
//! [`EngineOptions`](dvc_model::EngineOptions). Nothing here fails: malformed
//! patterns match nothing, and empty inputs produce empty or pass-through
//! results.

pub mod assignment;
pub mod engine;
pub mod filter;
pub mod pattern;
pub mod policy;
pub mod resolver;
pub mod reveal;

pub use assignment::{assign, sort_layers};
pub use engine::{Resolution, VisibilityEngine};
pub use filter::{IdSet, match_ids};
pub use pattern::{PatternError, PatternMatcher, is_regex_pattern};
pub use policy::{AdvancedPolicy, BasicPolicy, VisibilityPolicy, policy_for};
pub use resolver::claimed_ids;
pub use reveal::VisibleElements;
