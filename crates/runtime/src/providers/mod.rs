//! Concrete [`ActionProvider`](crate::api::ActionProvider) implementations.
pub mod ai;

pub use ai::{AiProvider, PlannerMode, Strategy, UtilityStrategy};
