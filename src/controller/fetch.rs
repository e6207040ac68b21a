//! Tiered content fetches: categories → collections → collection detail.
//!
//! Every fetch carries the generation token captured when its selection was
//! made; the model discards completions whose token no longer matches, so a
//! slow response for a superseded selection can never clobber newer state.
//! Fetches triggered by user input run in spawned tasks so the event loop
//! never blocks on the gateway.

use crate::model::{CollectionsFetch, DetailFetch};

use super::AppController;

impl AppController {
    /// Full (re)load: bio and categories together, then the tier chain.
    /// Used at startup and by the manual refresh binding.
    pub async fn refresh(&self) {
        let Some(gateway) = self.model.gateway() else {
            tracing::warn!("No content gateway configured");
            return;
        };

        self.stop_playback().await;
        self.model.begin_categories_load().await;

        let (bio, categories) =
            futures::future::join(gateway.bio(), gateway.list_categories()).await;

        // The bio is decorative; a failure leaves the header generic.
        match bio {
            Ok(bio) => self.model.set_bio(bio).await,
            Err(e) => tracing::warn!(error = %e, "Bio fetch failed"),
        }

        let fetch = match categories {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Categories loaded");
                self.model.apply_categories(categories).await
            }
            Err(e) => {
                tracing::error!(error = %e, "Categories fetch failed");
                self.model.set_error(Self::format_error(&e)).await;
                self.model.categories_failed().await
            }
        };
        self.load_collections(fetch).await;
    }

    /// Activate a category and fetch its collections in the background.
    pub(crate) async fn select_category(&self, id: &str) {
        if let Some(fetch) = self.model.set_active_category(id).await {
            self.stop_playback().await;
            let controller = self.clone();
            tokio::spawn(async move {
                controller.load_collections(fetch).await;
            });
        }
    }

    /// Switch to the neighboring category tab.
    pub(crate) async fn switch_category(&self, forward: bool) {
        if let Some(id) = self.model.adjacent_category_id(forward).await {
            self.select_category(&id).await;
        }
    }

    /// Activate a collection and fetch its detail in the background.
    pub(crate) async fn select_collection(&self, id: &str) {
        if let Some(fetch) = self.model.set_active_collection(id).await {
            self.stop_playback().await;
            let controller = self.clone();
            tokio::spawn(async move {
                controller.load_detail(fetch).await;
            });
        }
    }

    pub(crate) async fn load_collections(&self, fetch: CollectionsFetch) {
        let Some(gateway) = self.model.gateway() else {
            return;
        };
        tracing::debug!(
            category = %fetch.category_slug,
            generation = fetch.generation,
            "Loading collections"
        );
        match gateway.list_collections(&fetch.category_slug).await {
            Ok(collections) => {
                tracing::info!(
                    category = %fetch.category_slug,
                    count = collections.len(),
                    "Collections loaded"
                );
                if let Some(detail_fetch) =
                    self.model.apply_collections(fetch.generation, collections).await
                {
                    self.load_detail(detail_fetch).await;
                }
            }
            Err(e) => {
                tracing::error!(category = %fetch.category_slug, error = %e, "Collections fetch failed");
                if self.model.collections_failed(fetch.generation).await {
                    self.model.set_error(Self::format_error(&e)).await;
                }
            }
        }
    }

    pub(crate) async fn load_detail(&self, fetch: DetailFetch) {
        let Some(gateway) = self.model.gateway() else {
            return;
        };
        tracing::debug!(
            collection = %fetch.collection_id,
            generation = fetch.generation,
            "Loading collection detail"
        );
        match gateway.collection_detail(&fetch.collection_id).await {
            Ok(detail) => {
                tracing::info!(
                    collection = %fetch.collection_id,
                    items = detail.items.len(),
                    "Collection detail loaded"
                );
                self.model.apply_detail(fetch.generation, detail).await;
            }
            Err(e) => {
                tracing::error!(collection = %fetch.collection_id, error = %e, "Detail fetch failed");
                if self.model.detail_failed(fetch.generation).await {
                    self.model.set_error(Self::format_error(&e)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::model::gateway::Result as GatewayResult;
    use crate::model::{
        AppModel, Bio, Category, CollectionDetail, CollectionSummary, ContentGateway, FetchPhase,
        ImageUrlBuilder, MediaItems,
    };

    use super::super::AppController;

    /// In-memory gateway with a per-collection delay on detail fetches, so
    /// tests can force a superseded response to resolve after a newer one.
    struct StubGateway {
        categories: Vec<Category>,
        collections: Vec<CollectionSummary>,
        details: HashMap<String, (Duration, CollectionDetail)>,
    }

    #[async_trait]
    impl ContentGateway for StubGateway {
        async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
            Ok(self.categories.clone())
        }

        async fn list_collections(&self, _category_slug: &str) -> GatewayResult<Vec<CollectionSummary>> {
            Ok(self.collections.clone())
        }

        async fn collection_detail(&self, collection_id: &str) -> GatewayResult<CollectionDetail> {
            let (delay, detail) = self.details.get(collection_id).expect("scripted collection").clone();
            tokio::time::sleep(delay).await;
            Ok(detail)
        }

        async fn bio(&self) -> GatewayResult<Bio> {
            Ok(Bio::default())
        }
    }

    fn category(id: &str) -> Category {
        Category { id: id.into(), title: id.to_uppercase(), slug: id.into() }
    }

    fn summary(id: &str, title: &str, order: Option<i64>) -> CollectionSummary {
        CollectionSummary {
            id: id.into(),
            title: title.into(),
            slug: title.to_lowercase(),
            description: None,
            order,
            item_count: 0,
        }
    }

    fn detail(id: &str, titles: &[&str]) -> CollectionDetail {
        CollectionDetail {
            id: id.into(),
            title: id.to_uppercase(),
            slug: id.into(),
            description: None,
            items: MediaItems::Tracks(
                titles
                    .iter()
                    .map(|t| crate::model::TrackItem {
                        key: format!("{}-{}", id, t),
                        title: t.to_string(),
                        year: None,
                        description: None,
                        kind: crate::model::MediaKind::Audio,
                        media: crate::model::content::MediaAsset {
                            reference: "file-x-mp3".into(),
                            url: "https://cdn.example.com/x.mp3".into(),
                        },
                        cover: None,
                    })
                    .collect(),
            ),
        }
    }

    fn controller_with(gateway: StubGateway) -> AppController {
        let mut model = AppModel::new(ImageUrlBuilder::default());
        model.set_gateway(Arc::new(gateway));
        AppController::new(model, Arc::new(Mutex::new(None)))
    }

    #[tokio::test(start_paused = true)]
    async fn slow_response_for_a_superseded_collection_is_discarded() {
        let gateway = StubGateway {
            categories: vec![category("audio")],
            collections: vec![
                summary("a", "A", Some(1)),
                summary("x", "X", Some(2)),
                summary("y", "Y", Some(3)),
            ],
            details: HashMap::from([
                ("a".to_string(), (Duration::ZERO, detail("a", &["a1"]))),
                // X resolves long after Y.
                ("x".to_string(), (Duration::from_millis(500), detail("x", &["x1", "x2"]))),
                ("y".to_string(), (Duration::from_millis(50), detail("y", &["y1"]))),
            ]),
        };
        let controller = controller_with(gateway);
        controller.refresh().await;

        // Fetch X, then before it resolves fetch Y.
        controller.select_collection("x").await;
        controller.select_collection("y").await;

        // Let both in-flight fetches resolve (Y first, X later).
        tokio::time::sleep(Duration::from_secs(1)).await;

        let nav = controller.model.frame_state().await.nav;
        assert_eq!(nav.active_collection.as_deref(), Some("y"));
        let loaded = nav.detail.expect("detail loaded");
        assert_eq!(loaded.id, "y");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(nav.detail_phase, FetchPhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_auto_selects_the_first_sorted_collection() {
        let gateway = StubGateway {
            categories: vec![category("photo")],
            collections: vec![summary("b", "B", Some(200)), summary("c", "C", Some(50))],
            details: HashMap::from([
                ("c".to_string(), (Duration::ZERO, detail("c", &["c1"]))),
                ("b".to_string(), (Duration::ZERO, detail("b", &["b1"]))),
            ]),
        };
        let controller = controller_with(gateway);
        controller.refresh().await;

        let nav = controller.model.frame_state().await.nav;
        assert_eq!(nav.active_collection.as_deref(), Some("c"));
        assert_eq!(nav.detail.unwrap().id, "c");
        assert!(!nav.user_picked_collection);
    }
}
