//! Runtime orchestration for creature battles.
//!
//! This crate wires the action provider abstraction, the utility AI and the
//! simulation worker into a cohesive runtime API. Consumers embed
//! [`Runtime`] to drive turns, subscribe to events, and interact with the
//! match through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`providers`] holds the AI decision engine
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, Decision, EndTurnProvider, Result, RuntimeError, RuntimeHandle,
    ScriptedProvider,
};
pub use events::{BattleEvent, Event, EventBus, Topic, TurnEvent};
pub use providers::{AiProvider, PlannerMode, Strategy, UtilityStrategy};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
