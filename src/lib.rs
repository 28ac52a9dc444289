//! A terminal maze game.
//!
//! A perfect maze is carved step by step with a randomized depth-first search, animated in the
//! terminal, and then raced through from the top-left corner to the bottom-right one while picking
//! up collectibles. The maze model lives in [`grid`], [`generator`], [`collectibles`], [`player`] and
//! [`session`]; it does not depend on the terminal, which is only touched by [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod collectibles;
pub mod config;
pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod player;
pub mod random;
pub mod session;
pub mod snapshot;

mod animation;
mod app;
mod events;
mod types;
mod ui;

pub use app::App;
