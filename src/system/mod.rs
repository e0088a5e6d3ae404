//! # System Interaction Layer
//!
//! The boundary between the pure command logic in `core` and the outside world.
//!
//! ## Modules
//!
//! - **`settings`**: Loads and writes `settings.toml`: where the catalogs live, the default
//!   tab, the player identity and the relay program.
//! - **`transport`**: Delivers a final command to the game server, either through an
//!   external relay program or as a dry run.

pub mod settings;
pub mod transport;
