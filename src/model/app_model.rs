//! Main application model with state management
//!
//! Owns the two-tier selection hierarchy (category → collection), the
//! per-tier fetch phases with their generation tokens, the lightbox, the
//! single currently-playing slot and the transient UI state. All selection
//! invariants live here; the controller only orchestrates fetches around
//! these transitions.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::assets::ImageUrlBuilder;
use super::content::{
    Bio, Category, CollectionDetail, CollectionSummary, CollectionsFetch, DetailFetch,
    FetchPhase, NavState, TrackItem, sort_collections,
};
use super::gateway::ContentGateway;
use super::lightbox::{Lightbox, LightboxView, ScrollLock};
use super::types::{ActivePane, UiState};

/// Typing cadence of the bio title animation.
const TYPE_INTERVAL: Duration = Duration::from_millis(80);
/// Blink cadence of the caret while the title is typing.
const CARET_BLINK_INTERVAL: Duration = Duration::from_millis(530);
/// Errors older than this are dismissed automatically.
const ERROR_TTL_SECS: u64 = 5;

/// Everything the view needs to draw one frame.
#[derive(Clone)]
pub struct FrameState {
    pub ui: UiState,
    pub nav: NavState,
    pub lightbox: LightboxView,
    pub playing: Option<TrackItem>,
    pub bio: Option<Bio>,
    pub assets: ImageUrlBuilder,
}

/// Main application model containing all state
#[derive(Clone)]
pub struct AppModel {
    gateway: Option<Arc<dyn ContentGateway>>,
    assets: ImageUrlBuilder,
    nav: Arc<Mutex<NavState>>,
    ui_state: Arc<Mutex<UiState>>,
    lightbox: Arc<Mutex<Lightbox>>,
    now_playing: Arc<Mutex<Option<TrackItem>>>,
    bio: Arc<Mutex<Option<Bio>>>,
    scroll_lock: ScrollLock,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(assets: ImageUrlBuilder) -> Self {
        let scroll_lock = ScrollLock::new();
        Self {
            gateway: None,
            assets,
            nav: Arc::new(Mutex::new(NavState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            lightbox: Arc::new(Mutex::new(Lightbox::new(scroll_lock.clone()))),
            now_playing: Arc::new(Mutex::new(None)),
            bio: Arc::new(Mutex::new(None)),
            scroll_lock,
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_gateway(&mut self, gateway: Arc<dyn ContentGateway>) {
        self.gateway = Some(gateway);
    }

    pub fn gateway(&self) -> Option<Arc<dyn ContentGateway>> {
        self.gateway.clone()
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub async fn frame_state(&self) -> FrameState {
        // One lock at a time; the guards must not overlap.
        let ui = self.ui_state.lock().await.clone();
        let nav = self.nav.lock().await.clone();
        let lightbox = self.lightbox.lock().await.view();
        let playing = self.now_playing.lock().await.clone();
        let bio = self.bio.lock().await.clone();
        FrameState { ui, nav, lightbox, playing, bio, assets: self.assets.clone() }
    }

    // ========================================================================
    // Navigator & fetch-tier transitions
    // ========================================================================

    /// Start (or restart) the whole tier chain: categories, collections and
    /// detail all become loading, and every in-flight completion is
    /// invalidated by bumping the generations.
    pub async fn begin_categories_load(&self) {
        {
            let mut nav = self.nav.lock().await;
            nav.categories_phase = FetchPhase::Loading;
            nav.collections.clear();
            nav.collections_phase = FetchPhase::Loading;
            nav.active_category = None;
            nav.active_collection = None;
            nav.user_picked_collection = false;
            nav.detail = None;
            nav.detail_phase = FetchPhase::Loading;
            nav.collections_generation += 1;
            nav.detail_generation += 1;
        }
        self.clear_media_session().await;
        self.reset_cursors().await;
    }

    /// Apply a categories response. An empty list synthesizes the single
    /// default category so the downstream tiers stay usable. The first
    /// category becomes active and its collections fetch is requested.
    pub async fn apply_categories(&self, mut categories: Vec<Category>) -> CollectionsFetch {
        if categories.is_empty() {
            tracing::debug!("No categories on content; synthesizing default");
            categories.push(Category::fallback());
        }
        let mut nav = self.nav.lock().await;
        nav.categories = categories;
        nav.categories_phase = FetchPhase::Loaded;
        let first = nav.categories[0].clone();
        nav.active_category = Some(first.id);
        nav.collections_phase = FetchPhase::Loading;
        nav.collections_generation += 1;
        CollectionsFetch { category_slug: first.slug, generation: nav.collections_generation }
    }

    /// Categories fetch failed: fall back to the synthesized default
    /// category and still drive the collections tier from it.
    pub async fn categories_failed(&self) -> CollectionsFetch {
        let mut nav = self.nav.lock().await;
        let fallback = Category::fallback();
        nav.categories = vec![fallback.clone()];
        nav.categories_phase = FetchPhase::Failed;
        nav.active_category = Some(fallback.id);
        nav.collections_phase = FetchPhase::Loading;
        nav.collections_generation += 1;
        CollectionsFetch { category_slug: fallback.slug, generation: nav.collections_generation }
    }

    /// Activate a category. Reselecting the already-active category never
    /// re-triggers a fetch (source behavior; recovery goes through the
    /// manual refresh instead). Activation invalidates the previous
    /// collection selection, any playing track and the lightbox.
    pub async fn set_active_category(&self, id: &str) -> Option<CollectionsFetch> {
        let fetch = {
            let mut nav = self.nav.lock().await;
            if nav.active_category.as_deref() == Some(id) {
                return None;
            }
            let Some(category) = nav.categories.iter().find(|c| c.id == id).cloned() else {
                tracing::debug!(category = id, "Ignoring selection of unknown category");
                return None;
            };
            nav.active_category = Some(category.id);
            nav.active_collection = None;
            nav.user_picked_collection = false;
            nav.collections.clear();
            nav.collections_phase = FetchPhase::Loading;
            nav.detail = None;
            nav.detail_phase = FetchPhase::Loading;
            nav.collections_generation += 1;
            nav.detail_generation += 1;
            CollectionsFetch { category_slug: category.slug, generation: nav.collections_generation }
        };
        self.clear_media_session().await;
        self.reset_cursors().await;
        Some(fetch)
    }

    /// Apply a collections response for the given generation. Stale
    /// completions are discarded wholesale. Returns the detail fetch for
    /// the auto-selected first collection, when the default-selection
    /// policy applies.
    pub async fn apply_collections(
        &self,
        generation: u64,
        mut collections: Vec<CollectionSummary>,
    ) -> Option<DetailFetch> {
        let (fetch, cursor) = {
            let mut nav = self.nav.lock().await;
            if generation != nav.collections_generation {
                tracing::debug!(
                    generation,
                    current = nav.collections_generation,
                    "Discarding stale collections response"
                );
                return None;
            }
            sort_collections(&mut collections);
            nav.collections = collections;
            nav.collections_phase = FetchPhase::Loaded;

            // Never hold an active collection id absent from the loaded list.
            if let Some(active) = nav.active_collection.clone() {
                if !nav.collections.iter().any(|c| c.id == active) {
                    tracing::debug!(collection = %active, "Active collection absent from loaded list; clearing");
                    nav.active_collection = None;
                }
            }

            let mut fetch = None;
            if nav.active_collection.is_none() {
                if nav.user_picked_collection {
                    // The user's explicit choice stands for this category;
                    // the default-selection policy applies only once.
                    nav.detail = None;
                    nav.detail_phase = FetchPhase::Idle;
                } else if let Some(first) = nav.collections.first().cloned() {
                    nav.active_collection = Some(first.id.clone());
                    nav.detail = None;
                    nav.detail_phase = FetchPhase::Loading;
                    nav.detail_generation += 1;
                    fetch = Some(DetailFetch {
                        collection_id: first.id,
                        generation: nav.detail_generation,
                    });
                } else {
                    nav.detail = None;
                    nav.detail_phase = FetchPhase::Idle;
                }
            }
            (fetch, nav.active_collection_index().unwrap_or(0))
        };
        let mut ui = self.ui_state.lock().await;
        ui.collection_cursor = cursor;
        fetch
    }

    /// Collections fetch failed. Falls back to an empty list; returns
    /// whether the completion applied (i.e. was not stale).
    pub async fn collections_failed(&self, generation: u64) -> bool {
        let mut nav = self.nav.lock().await;
        if generation != nav.collections_generation {
            tracing::debug!(generation, "Discarding stale collections failure");
            return false;
        }
        nav.collections = Vec::new();
        nav.collections_phase = FetchPhase::Failed;
        nav.active_collection = None;
        nav.detail = None;
        nav.detail_phase = FetchPhase::Idle;
        true
    }

    /// Activate a collection. Only ids present in the loaded list are
    /// accepted; anything else is silently ignored. Marks the explicit
    /// user choice for this category scope.
    pub async fn set_active_collection(&self, id: &str) -> Option<DetailFetch> {
        let fetch = {
            let mut nav = self.nav.lock().await;
            if nav.active_collection.as_deref() == Some(id) {
                return None;
            }
            if !nav.collections.iter().any(|c| c.id == id) {
                tracing::debug!(collection = id, "Ignoring selection absent from the loaded list");
                return None;
            }
            nav.active_collection = Some(id.to_string());
            nav.user_picked_collection = true;
            nav.detail = None;
            nav.detail_phase = FetchPhase::Loading;
            nav.detail_generation += 1;
            DetailFetch { collection_id: id.to_string(), generation: nav.detail_generation }
        };
        self.clear_media_session().await;
        {
            let mut ui = self.ui_state.lock().await;
            ui.item_cursor = 0;
        }
        Some(fetch)
    }

    /// Apply a collection-detail response. Besides the generation token,
    /// the dependency is re-checked at completion time: the write belongs
    /// to the currently active collection or not at all.
    pub async fn apply_detail(&self, generation: u64, detail: CollectionDetail) -> bool {
        {
            let mut nav = self.nav.lock().await;
            if generation != nav.detail_generation {
                tracing::debug!(
                    generation,
                    current = nav.detail_generation,
                    "Discarding stale detail response"
                );
                return false;
            }
            if nav.active_collection.as_deref() != Some(detail.id.as_str()) {
                tracing::debug!(collection = %detail.id, "Discarding detail response for a superseded selection");
                return false;
            }
            nav.detail = Some(detail);
            nav.detail_phase = FetchPhase::Loaded;
        }
        let mut ui = self.ui_state.lock().await;
        ui.item_cursor = 0;
        true
    }

    /// Detail fetch failed. Falls back to no items; returns whether the
    /// completion applied.
    pub async fn detail_failed(&self, generation: u64) -> bool {
        let mut nav = self.nav.lock().await;
        if generation != nav.detail_generation {
            tracing::debug!(generation, "Discarding stale detail failure");
            return false;
        }
        nav.detail = None;
        nav.detail_phase = FetchPhase::Failed;
        true
    }

    // ========================================================================
    // Media session (lightbox + currently playing)
    // ========================================================================

    /// Close the lightbox and drop the currently-playing selection. Runs on
    /// every parent-selection change and on teardown.
    pub async fn clear_media_session(&self) {
        self.lightbox.lock().await.close();
        let mut playing = self.now_playing.lock().await;
        if playing.take().is_some() {
            tracing::debug!("Cleared currently playing track");
        }
    }

    async fn image_count(&self) -> usize {
        let nav = self.nav.lock().await;
        nav.detail
            .as_ref()
            .and_then(|d| d.items.images())
            .map(|images| images.len())
            .unwrap_or(0)
    }

    /// Open the lightbox at `index` into the active image list. Out-of-range
    /// indices (or a non-image collection) are ignored.
    pub async fn open_lightbox(&self, index: usize) -> bool {
        if index >= self.image_count().await {
            return false;
        }
        self.lightbox.lock().await.open(index);
        true
    }

    pub async fn close_lightbox(&self) {
        self.lightbox.lock().await.close();
    }

    pub async fn lightbox_next(&self) {
        let len = self.image_count().await;
        self.lightbox.lock().await.next(len);
    }

    pub async fn lightbox_previous(&self) {
        let len = self.image_count().await;
        self.lightbox.lock().await.previous(len);
    }

    pub async fn is_lightbox_open(&self) -> bool {
        self.lightbox.lock().await.is_open()
    }

    pub async fn track_at(&self, index: usize) -> Option<TrackItem> {
        let nav = self.nav.lock().await;
        nav.detail
            .as_ref()
            .and_then(|d| d.items.tracks())
            .and_then(|tracks| tracks.get(index))
            .cloned()
    }

    pub async fn set_now_playing(&self, item: TrackItem) {
        *self.now_playing.lock().await = Some(item);
    }

    pub async fn now_playing(&self) -> Option<TrackItem> {
        self.now_playing.lock().await.clone()
    }

    // ========================================================================
    // Bio
    // ========================================================================

    /// Install the bio document and restart the title typing animation.
    pub async fn set_bio(&self, bio: Bio) {
        *self.bio.lock().await = Some(bio);
        let mut ui = self.ui_state.lock().await;
        ui.bio_chars = 0;
        ui.caret_visible = true;
        ui.last_type_tick = Instant::now();
        ui.last_caret_toggle = Instant::now();
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_pane_forward(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.active_pane = ui.active_pane.next();
    }

    pub async fn cycle_pane_backward(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.active_pane = ui.active_pane.prev();
    }

    async fn reset_cursors(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.collection_cursor = 0;
        ui.item_cursor = 0;
    }

    pub async fn move_cursor_up(&self) {
        let mut ui = self.ui_state.lock().await;
        match ui.active_pane {
            ActivePane::Collections => {
                ui.collection_cursor = ui.collection_cursor.saturating_sub(1);
            }
            ActivePane::Items => {
                ui.item_cursor = ui.item_cursor.saturating_sub(1);
            }
            ActivePane::Categories => {}
        }
    }

    pub async fn move_cursor_down(&self) {
        let (collections_len, items_len) = {
            let nav = self.nav.lock().await;
            (nav.collections.len(), nav.item_count())
        };
        let mut ui = self.ui_state.lock().await;
        match ui.active_pane {
            ActivePane::Collections => {
                if ui.collection_cursor < collections_len.saturating_sub(1) {
                    ui.collection_cursor += 1;
                }
            }
            ActivePane::Items => {
                if ui.item_cursor < items_len.saturating_sub(1) {
                    ui.item_cursor += 1;
                }
            }
            ActivePane::Categories => {}
        }
    }

    pub async fn collection_id_at_cursor(&self) -> Option<String> {
        let cursor = self.ui_state.lock().await.collection_cursor;
        let nav = self.nav.lock().await;
        nav.collections.get(cursor).map(|c| c.id.clone())
    }

    /// The category adjacent to the active one, for Left/Right switching.
    pub async fn adjacent_category_id(&self, forward: bool) -> Option<String> {
        let nav = self.nav.lock().await;
        if nav.categories.is_empty() {
            return None;
        }
        let len = nav.categories.len();
        let current = nav.active_category_index().unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        Some(nav.categories[next].id.clone())
    }

    pub async fn set_error(&self, message: String) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = Some(message);
        ui.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = None;
        ui.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn show_contact_popup(&self) {
        self.ui_state.lock().await.show_contact_popup = true;
    }

    pub async fn hide_contact_popup(&self) {
        self.ui_state.lock().await.show_contact_popup = false;
    }

    pub async fn is_contact_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_contact_popup
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    /// One UI tick: age out errors and advance the bio title animation.
    pub async fn tick_interface(&self) {
        {
            let mut ui = self.ui_state.lock().await;
            if let Some(timestamp) = ui.error_timestamp {
                if timestamp.elapsed().as_secs() > ERROR_TTL_SECS {
                    ui.error_message = None;
                    ui.error_timestamp = None;
                }
            }
        }
        let title_len = {
            let bio = self.bio.lock().await;
            bio.as_ref().map(|b| b.title.chars().count()).unwrap_or(0)
        };
        let mut ui = self.ui_state.lock().await;
        let now = Instant::now();
        if ui.bio_chars < title_len {
            if now.duration_since(ui.last_type_tick) >= TYPE_INTERVAL {
                ui.bio_chars += 1;
                ui.last_type_tick = now;
            }
            if now.duration_since(ui.last_caret_toggle) >= CARET_BLINK_INTERVAL {
                ui.caret_visible = !ui.caret_visible;
                ui.last_caret_toggle = now;
            }
        } else {
            ui.caret_visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{AssetRef, ImageItem, MediaAsset, MediaItems, MediaKind};

    fn model() -> AppModel {
        AppModel::new(ImageUrlBuilder::default())
    }

    fn category(id: &str) -> Category {
        Category { id: id.to_string(), title: id.to_uppercase(), slug: id.to_string() }
    }

    fn summary(id: &str, title: &str, order: Option<i64>) -> CollectionSummary {
        CollectionSummary {
            id: id.to_string(),
            title: title.to_string(),
            slug: title.to_lowercase(),
            description: None,
            order,
            item_count: 0,
        }
    }

    fn image_detail(id: &str, count: usize) -> CollectionDetail {
        let images = (0..count)
            .map(|i| ImageItem {
                key: format!("k{}", i),
                asset: AssetRef {
                    reference: format!("image-a{}-100x100-jpg", i),
                    kind: "reference".to_string(),
                },
            })
            .collect();
        CollectionDetail {
            id: id.to_string(),
            title: id.to_uppercase(),
            slug: id.to_string(),
            description: None,
            items: MediaItems::Images(images),
        }
    }

    fn track(key: &str) -> TrackItem {
        TrackItem {
            key: key.to_string(),
            title: format!("Track {}", key),
            year: None,
            description: None,
            kind: MediaKind::Audio,
            media: MediaAsset {
                reference: "file-x-mp3".to_string(),
                url: "https://cdn.example.com/x.mp3".to_string(),
            },
            cover: None,
        }
    }

    #[tokio::test]
    async fn empty_categories_synthesize_a_default() {
        let model = model();
        let fetch = model.apply_categories(Vec::new()).await;
        assert_eq!(fetch.category_slug, "portfolio");
        let nav = model.nav.lock().await;
        assert_eq!(nav.categories.len(), 1);
        assert_eq!(nav.categories[0].id, "portfolio");
        assert_eq!(nav.active_category.as_deref(), Some("portfolio"));
        assert!(nav.collections_phase.is_loading());
    }

    #[tokio::test]
    async fn no_collection_is_active_until_the_list_loads() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        {
            let nav = model.nav.lock().await;
            assert_eq!(nav.active_collection, None);
            assert!(nav.collections_phase.is_loading());
        }
        let detail_fetch = model
            .apply_collections(
                fetch.generation,
                vec![
                    summary("b", "B", Some(200)),
                    summary("a", "A", None),
                    summary("c", "C", Some(50)),
                ],
            )
            .await
            .expect("auto-select issues a detail fetch");
        let nav = model.nav.lock().await;
        let titles: Vec<&str> = nav.collections.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
        // The first sorted collection is auto-selected.
        assert_eq!(nav.active_collection.as_deref(), Some("c"));
        assert_eq!(detail_fetch.collection_id, "c");
        assert!(!nav.user_picked_collection);
    }

    #[tokio::test]
    async fn stale_collections_response_is_discarded() {
        let model = model();
        model.apply_categories(vec![category("photo"), category("art")]).await;
        let old = model.set_active_category("art").await.unwrap();
        let new = model.set_active_category("photo").await.unwrap();
        assert!(old.generation < new.generation);

        // The old category's list arrives after the switch: discarded.
        assert!(model.apply_collections(old.generation, vec![summary("x", "X", None)]).await.is_none());
        {
            let nav = model.nav.lock().await;
            assert!(nav.collections.is_empty());
            assert!(nav.collections_phase.is_loading());
        }
        // The current one applies.
        assert!(model.apply_collections(new.generation, vec![summary("y", "Y", None)]).await.is_some());
        let nav = model.nav.lock().await;
        assert_eq!(nav.collections[0].id, "y");
        assert_eq!(nav.collections_phase, FetchPhase::Loaded);
    }

    #[tokio::test]
    async fn late_detail_for_a_superseded_collection_never_applies() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        let first = model
            .apply_collections(fetch.generation, vec![summary("x", "X", None), summary("y", "Y", None)])
            .await
            .unwrap();
        assert_eq!(first.collection_id, "x");

        // Before X's detail resolves the user picks Y.
        let second = model.set_active_collection("y").await.unwrap();

        // X's slow response arrives after Y's fast one.
        assert!(model.apply_detail(second.generation, image_detail("y", 2)).await);
        assert!(!model.apply_detail(first.generation, image_detail("x", 9)).await);

        let nav = model.nav.lock().await;
        assert_eq!(nav.detail.as_ref().unwrap().id, "y");
        assert_eq!(nav.detail.as_ref().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn selecting_a_category_clears_collection_playing_and_lightbox() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo"), category("art")]).await;
        let detail_fetch = model
            .apply_collections(fetch.generation, vec![summary("x", "X", None)])
            .await
            .unwrap();
        model.apply_detail(detail_fetch.generation, image_detail("x", 3)).await;
        model.set_now_playing(track("t1")).await;
        assert!(model.open_lightbox(1).await);
        assert!(model.scroll_lock().is_engaged());

        model.set_active_category("art").await.unwrap();

        assert!(model.now_playing().await.is_none());
        assert!(!model.is_lightbox_open().await);
        assert!(!model.scroll_lock().is_engaged());
        let nav = model.nav.lock().await;
        assert_eq!(nav.active_collection, None);
        assert!(nav.detail.is_none());
        assert!(nav.detail_phase.is_loading());
    }

    #[tokio::test]
    async fn reselecting_the_active_category_is_a_noop() {
        let model = model();
        model.apply_categories(vec![category("photo")]).await;
        assert!(model.set_active_category("photo").await.is_none());
    }

    #[tokio::test]
    async fn selections_outside_the_loaded_list_are_ignored() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        model.apply_collections(fetch.generation, vec![summary("x", "X", None)]).await;
        assert!(model.set_active_collection("ghost").await.is_none());
        let nav = model.nav.lock().await;
        assert_eq!(nav.active_collection.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn selecting_a_collection_clears_the_playing_track() {
        let model = model();
        let fetch = model.apply_categories(vec![category("audio")]).await;
        model
            .apply_collections(fetch.generation, vec![summary("x", "X", None), summary("y", "Y", None)])
            .await;
        model.set_now_playing(track("t1")).await;
        model.set_active_collection("y").await.unwrap();
        assert!(model.now_playing().await.is_none());
    }

    #[tokio::test]
    async fn auto_select_applies_once_per_category_scope() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        model
            .apply_collections(fetch.generation, vec![summary("x", "X", None), summary("y", "Y", None)])
            .await;
        model.set_active_collection("y").await.unwrap();

        // A later list for the same category no longer contains Y: the
        // active selection is cleared, but the user's explicit choice
        // suppresses a second auto-select.
        let generation = model.nav.lock().await.collections_generation;
        assert!(model.apply_collections(generation, vec![summary("x", "X", None)]).await.is_none());
        let nav = model.nav.lock().await;
        assert_eq!(nav.active_collection, None);
        assert_eq!(nav.detail_phase, FetchPhase::Idle);
    }

    #[tokio::test]
    async fn collections_failure_falls_back_to_an_empty_list() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        assert!(model.collections_failed(fetch.generation).await);
        let nav = model.nav.lock().await;
        assert_eq!(nav.collections_phase, FetchPhase::Failed);
        assert!(nav.collections.is_empty());
        assert_eq!(nav.active_collection, None);
    }

    #[tokio::test]
    async fn lightbox_rejects_out_of_range_indices() {
        let model = model();
        let fetch = model.apply_categories(vec![category("photo")]).await;
        let detail_fetch = model
            .apply_collections(fetch.generation, vec![summary("x", "X", None)])
            .await
            .unwrap();
        model.apply_detail(detail_fetch.generation, image_detail("x", 2)).await;

        assert!(!model.open_lightbox(2).await);
        assert!(!model.is_lightbox_open().await);
        assert!(model.open_lightbox(1).await);
        assert!(model.is_lightbox_open().await);
    }
}
