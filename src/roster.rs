use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::cache::PageCache;
use crate::client::RosterClient;
use crate::constants::BROADCAST_BUFFER;
use crate::models::{Character, Mode};
use crate::scroll::{ScrollPosition, ScrollTrigger};
use crate::sort::{project, SortDirective};
use crate::window::VisibleWindow;

/// Change notification emitted when a page fetch settles.
#[derive(Debug, Clone)]
pub enum RosterEvent {
    PageLoaded(u32),
    PageFailed(u32),
}

/// What the renderer reads: the ordered view plus status flags. `visible`
/// equals the full view length in auto mode.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entities: Vec<Character>,
    pub visible: usize,
    pub mode: Mode,
    pub scrolled_past_threshold: bool,
    pub loading: bool,
    pub exhausted: bool,
    pub error: Option<String>,
}

impl Snapshot {
    pub fn visible_slice(&self) -> &[Character] {
        &self.entities[..self.visible.min(self.entities.len())]
    }
}

struct RosterState {
    cache: PageCache,
    window: VisibleWindow,
    scroll: ScrollTrigger,
    mode: Mode,
    sort: SortDirective,
}

struct RosterInner {
    client: RosterClient,
    state: RwLock<RosterState>,
    sender: broadcast::Sender<RosterEvent>,
}

impl RosterInner {
    fn notify(&self, event: RosterEvent) {
        let _ = self.sender.send(event);
    }
}

/// Owns the page cache, visible window, scroll trigger, mode, and active
/// sort for one list view. All mutation goes through these methods; spawned
/// fetches run to completion even if every handle is dropped, and a late
/// response is simply cached.
#[derive(Clone)]
pub struct Roster {
    inner: Arc<RosterInner>,
}

impl Roster {
    pub fn new(client: RosterClient) -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_BUFFER);
        Self {
            inner: Arc::new(RosterInner {
                client,
                state: RwLock::new(RosterState {
                    cache: PageCache::default(),
                    window: VisibleWindow::default(),
                    scroll: ScrollTrigger::default(),
                    mode: Mode::Manual,
                    sort: SortDirective::default(),
                }),
                sender,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.inner.sender.subscribe()
    }

    /// Fetches `page` unless the cache absorbs the request (already cached,
    /// already in flight, out of order, or past the end of the collection).
    /// Returns whether a fetch actually started; its outcome arrives as a
    /// RosterEvent.
    pub async fn ensure_page(&self, page: u32) -> bool {
        let admitted = {
            let mut state = self.inner.state.write().await;
            state.cache.begin(page)
        };
        if !admitted {
            debug!(page, "page fetch absorbed");
            return false;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            match inner.client.fetch_page(page).await {
                Ok(result) => {
                    let mut state = inner.state.write().await;
                    state.cache.complete(page, result);
                    drop(state);
                    inner.notify(RosterEvent::PageLoaded(page));
                }
                Err(err) => {
                    warn!(page, %err, "page fetch failed");
                    let mut state = inner.state.write().await;
                    state.cache.fail(page, err);
                    drop(state);
                    inner.notify(RosterEvent::PageFailed(page));
                }
            }
        });
        true
    }

    /// Fetches the successor of the highest cached page, or page 1 on an
    /// empty cache. Does nothing once the collection end has been seen.
    pub async fn ensure_next(&self) -> bool {
        let target = {
            let state = self.inner.state.read().await;
            state.cache.next_target()
        };
        match target {
            Some(page) => self.ensure_page(page).await,
            None => false,
        }
    }

    pub async fn set_sort(&self, directive: SortDirective) {
        let mut state = self.inner.state.write().await;
        state.sort = directive;
    }

    /// Manual-mode grow: reveals up to five more already-cached rows, then
    /// tops up the cache once the window has hit its end.
    pub async fn load_more(&self) {
        let fetch_needed = {
            let mut state = self.inner.state.write().await;
            let len = state.cache.len();
            state.window.grow(len);
            state.window.visible() >= len
        };
        if fetch_needed {
            self.ensure_next().await;
        }
    }

    pub async fn load_less(&self) {
        let mut state = self.inner.state.write().await;
        state.window.shrink();
    }

    /// Flips manual/auto. Cached pages survive the switch; entering auto
    /// fetches nothing until a qualifying scroll event arrives, and leaving
    /// it detaches the scroll trigger.
    pub async fn toggle_mode(&self) -> Mode {
        let mut state = self.inner.state.write().await;
        state.mode = state.mode.toggled();
        match state.mode {
            Mode::Auto => state.scroll.attach(),
            Mode::Manual => state.scroll.detach(),
        }
        state.mode
    }

    /// Scroll report from the host viewport. May trigger the next page in
    /// auto mode; the cache absorbs the repeats that come from lingering
    /// near the bottom.
    pub async fn report_scroll(&self, position: ScrollPosition) {
        let fetch_needed = {
            let mut state = self.inner.state.write().await;
            state.scroll.observe(position)
        };
        if fetch_needed {
            self.ensure_next().await;
        }
    }

    pub async fn scroll_to_top(&self) {
        let mut state = self.inner.state.write().await;
        state.scroll.reset_top();
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.inner.state.read().await;
        let entities = project(&state.cache.flattened(), &state.sort);
        let visible = match state.mode {
            Mode::Manual => state.window.visible(),
            Mode::Auto => entities.len(),
        };
        Snapshot {
            visible,
            mode: state.mode,
            scrolled_past_threshold: state.scroll.is_past_threshold(),
            loading: state.cache.is_loading(),
            exhausted: state.cache.is_exhausted(),
            error: state
                .cache
                .failure()
                .map(|(page, error)| format!("page {}: {}", page, error)),
            entities,
        }
    }
}
