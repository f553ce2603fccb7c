pub(crate) const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub(crate) const PAGE_SIZE: u32 = 5;
pub(crate) const WINDOW_STEP: usize = 5;
pub(crate) const MIN_VISIBLE: usize = 5;

pub(crate) const SCROLL_TOP_THRESHOLD_PX: f64 = 100.0;
pub(crate) const BOTTOM_PROXIMITY_PX: f64 = 100.0;

pub(crate) const BROADCAST_BUFFER: usize = 64;
