//! A shareable handle to [`headless_app`] for rspec environments.
//!
//! Shared between rspec steps behind a mutex; suites using it must run
//! serially.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bevy::prelude::*;
use shuttle::headless_app;

/// Seconds each update advances the clock by.
pub const STEP_SECONDS: f32 = 0.1;

/// Owns the wrapped `App` so it can sit inside an rspec environment.
pub struct LockedApp(App);

impl Deref for LockedApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LockedApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec environments must be `Send + Sync`. Suites run with
// parallelism disabled and every access goes through the mutex below.
unsafe impl Send for LockedApp {}
unsafe impl Sync for LockedApp {}

/// Cloneable handle to one headless app.
#[derive(Clone)]
pub struct HeadlessApp(Arc<Mutex<LockedApp>>);

impl fmt::Debug for HeadlessApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessApp").finish_non_exhaustive()
    }
}

impl HeadlessApp {
    /// Build a warmed-up app whose clock advances by [`STEP_SECONDS`] per
    /// update.
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(LockedApp(headless_app(
            Duration::from_secs_f32(STEP_SECONDS),
        )))))
    }

    /// Lock the app, recovering from a poisoned mutex.
    pub fn lock(&self) -> MutexGuard<'_, LockedApp> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn an entity with `bundle`.
    pub fn spawn(&self, bundle: impl Bundle) -> Entity {
        self.lock().world_mut().spawn(bundle).id()
    }

    /// Run `count` updates.
    pub fn tick(&self, count: usize) {
        let mut app = self.lock();
        for _ in 0..count {
            app.update();
        }
    }

    /// Planar position of `entity`.
    ///
    /// # Panics
    /// Panics when the entity has no `Transform`.
    pub fn position(&self, entity: Entity) -> Vec2 {
        self.lock()
            .world()
            .get::<Transform>(entity)
            .map(|transform| transform.translation.truncate())
            .unwrap_or_else(|| panic!("{entity:?} has no Transform"))
    }

    /// A copy of `entity`'s component `T`, if present.
    pub fn component<T: Component + Clone>(&self, entity: Entity) -> Option<T> {
        self.lock().world().get::<T>(entity).cloned()
    }
}
