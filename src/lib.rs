//! # portfolio-core-view
//!
//! Core view-state and text-reveal engine for an animated single-page
//! portfolio.
//!
//! This crate provides platform-agnostic state and logic for:
//! - Sequencing multi-step page transitions (about, projects, studio mural)
//! - Revealing and erasing text one character at a time
//! - Scheduling delayed steps that can be cancelled as a unit
//! - Describing the layers to draw, with their transforms and transitions
//!
//! The crate never reads a clock. The host passes the current time in
//! milliseconds to every intent and to [`Portfolio::update`].
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load a [`SiteConfig`] from TOML
//! - `web` - Enable web/WASM DOM binding
//!
//! ## Example
//!
//! ```rust
//! use portfolio_core_view::{LayerKind, Portfolio, ViewState};
//!
//! let mut page = Portfolio::new();
//! page.go_to_projects(0);
//!
//! // Render from a timer: advance, then draw the scene.
//! page.update(2_000);
//! assert_eq!(page.view_state(), ViewState::Projects);
//!
//! let scene = page.scene();
//! assert!(scene.layer(LayerKind::ProjectsList).unwrap().mounted);
//! ```

mod config;
mod content;
mod easing;
mod portfolio;
mod reveal;
pub mod scene;
mod schedule;
mod view;

#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, SiteConfig, TransitionTimings};
pub use content::{ProjectAction, ProjectEntry, RevealSource, SiteContent, BIO_TEXT, PROJECTS, STUDIO_MURAL_TEXT};
pub use easing::{Easing, Transition};
pub use portfolio::{Portfolio, Snapshot};
pub use reveal::{RevealDirection, RevealStart, RevealState, RevealTick, RunId, TextReveal};
pub use scene::{compose, BlendMode, Layer, LayerKind, Scene, Translate};
pub use schedule::{CancelPolicy, Fired, Scheduler, Step};
pub use view::{AboutPhase, BottomPhase, MuralPhase, ProjectsPhase, TransitionFlags, View, ViewState};

#[cfg(feature = "web")]
pub use web::apply_scene;
