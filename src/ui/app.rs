//! Dashboard Application State
//!
//! View navigation and key handling. Fetches are triggered on view entry and
//! on explicit refresh; the spawned task writes through the pipeline and the
//! render loop picks the result up from the store on the next tick.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::feed::FetchPipeline;
use crate::store::{DashboardSnapshot, SnapshotStore, StateEntry};

/// Active dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Summary,
    Map,
    Detail,
}

/// Selection handed to the detail view when the user opens it.
///
/// Resolved by exact name match at navigation time; the detail view does not
/// re-read the store afterwards.
#[derive(Debug, Clone)]
pub struct DetailSelection {
    pub selected_state: String,
    pub entry: Option<StateEntry>,
}

pub struct DashboardApp {
    pipeline: Arc<FetchPipeline>,
    store: Arc<SnapshotStore>,
    pub view: View,
    /// Cursor into the statewise list on the summary view.
    pub selected: usize,
    pub detail: Option<DetailSelection>,
    pub should_quit: bool,
}

impl DashboardApp {
    /// Create the app and trigger the initial summary-view fetch.
    pub fn new(pipeline: Arc<FetchPipeline>) -> Self {
        let store = pipeline.store().clone();
        let app = Self {
            pipeline,
            store,
            view: View::Summary,
            selected: 0,
            detail: None,
            should_quit: false,
        };
        app.trigger_refresh();
        app
    }

    /// Current snapshot for rendering.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.store.snapshot()
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.trigger_refresh(),
            KeyCode::Char('s') => self.open_view(View::Summary),
            KeyCode::Char('m') => self.open_view(View::Map),
            KeyCode::Esc => match self.view {
                View::Summary => self.should_quit = true,
                _ => self.open_view(View::Summary),
            },
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => {
                if self.view == View::Summary {
                    self.open_detail();
                }
            }
            _ => {}
        }
    }

    /// Switch views. Summary and map fetch once per entry, mirroring a view
    /// mount; the detail view only ever shows what it was handed.
    pub fn open_view(&mut self, view: View) {
        if view != View::Detail {
            self.detail = None;
        }
        let entered = self.view != view;
        self.view = view;

        if entered && matches!(view, View::Summary | View::Map) {
            self.trigger_refresh();
        }
    }

    /// Open the detail view for the currently selected state.
    pub fn open_detail(&mut self) {
        let snapshot = self.snapshot();
        let Some(selected) = snapshot.statewise.get(self.selected) else {
            return;
        };

        let selected_state = selected.state.clone();
        self.detail = Some(DetailSelection {
            entry: snapshot.find_state(&selected_state).cloned(),
            selected_state,
        });
        self.view = View::Detail;
    }

    pub fn move_selection(&mut self, delta: i64) {
        let len = self.snapshot().statewise.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as i64;
        self.selected = (current + delta).clamp(0, len as i64 - 1) as usize;
    }

    /// Kick off a fetch without blocking the render loop. A refresh that
    /// settles after the user navigated away just updates the store.
    pub fn trigger_refresh(&self) {
        let pipeline = self.pipeline.clone();
        tokio::spawn(async move {
            pipeline.refresh().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedError, StatsResponse, StatsSource};
    use crate::store::{FetchStatus, SnapshotUpdate};
    use async_trait::async_trait;

    struct NeverSource;

    #[async_trait]
    impl StatsSource for NeverSource {
        async fn fetch_latest(&self) -> Result<StatsResponse, FeedError> {
            Err(FeedError::Timeout)
        }
    }

    fn entry(state: &str, total: i64) -> StateEntry {
        StateEntry {
            state: state.to_string(),
            total,
            recovered: 0,
            deaths: 0,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn app_with_states(states: &[&str]) -> DashboardApp {
        let store = Arc::new(SnapshotStore::new());
        store.commit(SnapshotUpdate {
            total_cases: 0,
            recovered: 0,
            deaths: 0,
            statewise: states.iter().map(|s| entry(s, 1)).collect(),
            last_updated: None,
        });
        let pipeline = Arc::new(FetchPipeline::new(Arc::new(NeverSource), store));
        DashboardApp::new(pipeline)
    }

    #[tokio::test]
    async fn test_selection_clamps_to_list() {
        let mut app = app_with_states(&["Kerala", "Goa"]);

        app.move_selection(-1);
        assert_eq!(app.selected, 0);

        app.move_selection(1);
        app.move_selection(1);
        app.move_selection(1);
        assert_eq!(app.selected, 1);
    }

    #[tokio::test]
    async fn test_enter_opens_detail_with_matching_entry() {
        let mut app = app_with_states(&["Kerala", "Goa"]);
        app.move_selection(1);
        app.open_detail();

        assert_eq!(app.view, View::Detail);
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.selected_state, "Goa");
        assert_eq!(detail.entry.as_ref().unwrap().state, "Goa");
    }

    #[tokio::test]
    async fn test_detail_on_empty_list_is_a_noop() {
        let mut app = app_with_states(&[]);
        app.open_detail();
        assert_eq!(app.view, View::Summary);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_escape_leaves_detail_before_quitting() {
        let mut app = app_with_states(&["Kerala"]);
        app.open_detail();

        let esc = KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE);
        app.on_key(esc);
        assert_eq!(app.view, View::Summary);
        assert!(!app.should_quit);

        app.on_key(esc);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_observable_via_status() {
        let app = app_with_states(&["Kerala"]);
        app.pipeline.refresh().await;
        assert_eq!(app.snapshot().status, FetchStatus::Failed);
        // Prior data survives the failure
        assert_eq!(app.snapshot().statewise.len(), 1);
    }
}
