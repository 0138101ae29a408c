//! Serialization plans.
//!
//! A [`FramePlan`] is the flattened form of a record type: a sequence of
//! [`PlanStep`]s, each reading one field and writing it with a [`WriteOp`].
//! Plans are pure metadata, they hold static function pointers and sizes
//! only, and are executed by [`FramePlan::write`].

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod error;
mod frame_plan;
mod op;

// -----------------------------------------------------------------------------
// Exports

pub use builder::PlanBuilder;
pub use error::PlanError;
pub use frame_plan::FramePlan;
pub use op::{LeafEncoder, PlanStep, WriteOp};
