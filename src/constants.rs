pub mod query {

    pub const FIRST_PAGE: u32 = 1;

    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub const MIN_PAGE_SIZE: u32 = 1;

    pub const MAX_PAGE_SIZE: u32 = 100;
}

pub mod client {
    use std::time::Duration;

    pub const DEFAULT_PAGE_SIZE: u32 = 8;

    pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// File stem the override map is stored under.
    pub const WATCHED_OVERRIDES_KEY: &str = "watched_overrides_v1";

    pub const OFFLINE_NOTICE: &str = "Offline mode: showing bundled sample data";
}

pub const APP_NAME: &str = "episodic";
