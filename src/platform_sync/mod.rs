//! Bevy integration for platforms and passengers.
//!
//! Platforms are entities carrying [`PlatformSettings`] and a
//! [`PlatformCollider`]; passengers carry a [`PassengerCollider`] and,
//! when they can be moved, a [`PassengerMotor`]. [`ShuttlePlugin`] builds
//! each platform's controller on first sight and ticks it every frame.
//!
//! [`PlatformSettings`]: crate::components::PlatformSettings
//! [`PlatformCollider`]: crate::components::PlatformCollider
//! [`PassengerCollider`]: crate::components::PassengerCollider
//! [`PassengerMotor`]: crate::components::PassengerMotor

mod headless;
mod plugin;
mod snapshot;
mod systems;

pub use headless::headless_app;
pub use plugin::{PlatformRejected, ShuttlePlugin};
pub use snapshot::{PassengerQuery, PassengerSnapshot, TransformMover};
pub use systems::{
    advance_platforms_system, forget_removed_passengers_system, init_platforms_system,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn plugin_is_default_constructible() {
        let _: ShuttlePlugin = ShuttlePlugin;
    }

    #[rstest]
    fn empty_snapshot_never_hits() {
        use crate::collision::{CollisionLayers, CollisionQuery};
        use glam::Vec2;

        let snapshot = PassengerSnapshot::default();
        assert!(snapshot
            .raycast(Vec2::ZERO, Vec2::Y, 10.0, CollisionLayers::ALL)
            .is_none());
    }
}
