//! The plan cache.
//!
//! - [`PlanRegistry`]: builds each record type's [`FramePlan`] once and
//!   keeps it for the life of the registry.
//! - [`PlanRegistryArc`]: a cheaply cloneable shared handle.
//! - [`PlanState`]: the state of one cache entry.
//!
//! [`FramePlan`]: crate::plan::FramePlan

// -----------------------------------------------------------------------------
// Modules

mod plan_registry;

// -----------------------------------------------------------------------------
// Exports

pub use plan_registry::{PlanRegistry, PlanRegistryArc, PlanState};
