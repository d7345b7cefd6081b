pub mod episode_service;
pub mod episode_service_impl;
pub mod query;

pub use episode_service::{EpisodeError, EpisodeService};
pub use episode_service_impl::StoreEpisodeService;
pub use query::{EpisodeQuery, run_query};
