//! # Aidmap Architecture
//!
//! Aidmap is a **UI-agnostic faceted-filtering library** for
//! humanitarian service-location data. This is not a CLI application
//! that happens to have some library code — it's a library that
//! happens to have a CLI client, and the CLI plays the role any map or
//! list renderer would.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output                         │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Explorer facade (explorer.rs)                              │
//! │  - Owns the store, the controllers, the visible set         │
//! │  - Runs the full update cycle on every mutation             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filtering core (dimension.rs, composite.rs, filters/)      │
//! │  - Dimensions with replaceable predicates                   │
//! │  - Intersection + cross-filtered group counts               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data layer (model.rs, store.rs, loader.rs)                 │
//! │  - Immutable features, append-only store, GeoJSON reading   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The update cycle
//!
//! Every interaction — a checkbox click, a region click, a map-picked
//! origin, a new data batch — runs the same synchronous cycle:
//!
//! 1. the controller replaces its dimension's predicate,
//! 2. the facade recomputes the visible intersection,
//! 3. every widget is re-rendered from **cross-filtered** counts
//!    (each filter's counts reflect all the *other* filters), and
//! 4. `updated` is emitted for the renderer.
//!
//! Step 3 is the part faceted UIs most often get wrong: a widget's
//! counts are computed against the intersection of the other filters,
//! never against the unfiltered store and never against the widget's
//! own selection.
//!
//! ## No I/O assumptions in the core
//!
//! From `explorer.rs` inward, code takes regular arguments, returns
//! regular `Result` types, and never touches stdout or a terminal.
//! The same core could drive a web map, a TUI, or a test harness.
//!
//! ## Module overview
//!
//! - [`explorer`]: the facade — entry point for all operations
//! - [`filters`]: the category/proximity/region controllers
//! - [`dimension`]: accessors and replaceable predicates
//! - [`composite`]: intersection and cross-filtered group counts
//! - [`widgets`]: pure widget models the controllers keep in sync
//! - [`store`]: the append-only feature store
//! - [`model`]: core data types (`Feature`, `Coordinate`)
//! - [`loader`]: GeoJSON reading for features and region polygons
//! - [`user_location`]: the external position provider model
//! - [`events`]: the observer interface (`subscribe`/`notify`)
//! - [`config`]: filter definitions and distance steps
//! - [`error`]: error types
//! - `cli`: argument parsing and printing for the binary (not part of
//!   the lib API)

pub mod composite;
pub mod config;
pub mod dimension;
pub mod error;
pub mod events;
pub mod explorer;
pub mod filters;
pub mod loader;
pub mod model;
pub mod store;
pub mod user_location;
pub mod widgets;
