//! Worker spawning and its configuration.
//!
//! - [`spawner`]: the [`Spawn`] trait, [`ThreadSpawner`], and the default spawner
//! - [`config`]: [`SpawnConfig`] with environment and config-file overrides
//! - [`stored_task`]: type-erased work handed to a spawner

pub mod config;
pub mod spawner;
pub mod stored_task;

pub use config::{SpawnConfig, apply_env_overrides};
pub use spawner::{Spawn, ThreadSpawner, default_spawner};
pub use stored_task::StoredTask;
