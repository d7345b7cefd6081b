//! List client: remote API access, local watched overrides, the bundled
//! offline dataset and the controller that reconciles the three.

pub mod api;
pub mod controller;
pub mod error;
pub mod offline;
pub mod overrides;

pub use api::{EpisodeApi, HttpEpisodeApi};
pub use controller::{
    ListController, ListFilters, ListSnapshot, LoadOutcome, LoadPhase, PendingSync, SyncOutcome,
};
pub use error::{ClientError, OverrideStoreError};
pub use overrides::{JsonFileOverrideStore, OverrideStore, WatchedOverrides, reconcile};
