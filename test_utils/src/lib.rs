//! Utility helpers for tests.
//!
//! Fakes for the collision and movement boundaries so the platform engine
//! can be driven without a Bevy app.

pub mod world;
pub mod scripted;

pub use scripted::ScriptedHits;
pub use world::{BodyId, FakeBody, FakeWorld, MoveRecord};
