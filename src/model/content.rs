//! Content data structures: categories, collections, media items and the
//! per-tier fetch state driving the gallery navigation.

/// Display order assigned to collections that carry no explicit order.
/// Lower numbers appear first, so unordered collections interleave
/// alphabetically after explicitly low-ordered ones.
pub const DEFAULT_DISPLAY_ORDER: i64 = 100;

/// A top-level grouping of collections (e.g. "Photography" vs "Artwork").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub slug: String,
}

impl Category {
    /// The single category synthesized when the gateway reports none
    /// (or the categories fetch fails outright).
    pub fn fallback() -> Self {
        Self {
            id: "portfolio".to_string(),
            title: "Portfolio".to_string(),
            slug: "portfolio".to_string(),
        }
    }
}

/// A collection as listed in the sidebar (without its items).
#[derive(Clone, Debug)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order: Option<i64>,
    pub item_count: u32,
}

impl CollectionSummary {
    fn sort_key(&self) -> (i64, &str) {
        (self.order.unwrap_or(DEFAULT_DISPLAY_ORDER), self.title.as_str())
    }
}

/// Sort collections the way they are always presented: ascending by
/// (order, title), with the order defaulting to [`DEFAULT_DISPLAY_ORDER`].
pub fn sort_collections(collections: &mut [CollectionSummary]) {
    collections.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// An opaque reference to a stored asset, resolvable to a URL by the
/// image URL builder. The core never looks inside `reference`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRef {
    pub reference: String,
    pub kind: String,
}

/// A single image inside an image collection. Carries no metadata of its
/// own; title and description live on the collection.
#[derive(Clone, Debug)]
pub struct ImageItem {
    pub key: String,
    pub asset: AssetRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
        }
    }
}

/// A playable media file with its resolved URL.
#[derive(Clone, Debug)]
pub struct MediaAsset {
    pub reference: String,
    pub url: String,
}

/// An audio or video track inside a track collection.
#[derive(Clone, Debug)]
pub struct TrackItem {
    pub key: String,
    pub title: String,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub kind: MediaKind,
    pub media: MediaAsset,
    pub cover: Option<AssetRef>,
}

/// The items of a collection, discriminated by collection kind. A fetched
/// list is replaced wholesale, never mutated in place.
#[derive(Clone, Debug)]
pub enum MediaItems {
    Images(Vec<ImageItem>),
    Tracks(Vec<TrackItem>),
}

impl MediaItems {
    pub fn len(&self) -> usize {
        match self {
            MediaItems::Images(images) => images.len(),
            MediaItems::Tracks(tracks) => tracks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn images(&self) -> Option<&[ImageItem]> {
        match self {
            MediaItems::Images(images) => Some(images),
            MediaItems::Tracks(_) => None,
        }
    }

    pub fn tracks(&self) -> Option<&[TrackItem]> {
        match self {
            MediaItems::Tracks(tracks) => Some(tracks),
            MediaItems::Images(_) => None,
        }
    }
}

/// A fully loaded collection with its ordered child items.
#[derive(Clone, Debug)]
pub struct CollectionDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub items: MediaItems,
}

/// Artist bio document (title + plain-text paragraphs).
#[derive(Clone, Debug, Default)]
pub struct Bio {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// Lifecycle of one fetch tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl FetchPhase {
    pub fn is_loading(self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    pub fn is_settled(self) -> bool {
        matches!(self, FetchPhase::Loaded | FetchPhase::Failed)
    }
}

/// Request handed to the fetch coordinator when the category selection
/// changes. The generation token makes superseded completions inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionsFetch {
    pub category_slug: String,
    pub generation: u64,
}

/// Request handed to the fetch coordinator when the collection selection
/// changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailFetch {
    pub collection_id: String,
    pub generation: u64,
}

/// Navigation state: the two-tier selection plus per-tier fetch phases.
/// Held behind the model's lock; mutated only through `AppModel` methods
/// so the selection invariants stay in one place.
#[derive(Clone, Debug, Default)]
pub struct NavState {
    pub categories: Vec<Category>,
    pub categories_phase: FetchPhase,
    pub active_category: Option<String>,
    pub collections: Vec<CollectionSummary>,
    pub collections_phase: FetchPhase,
    pub active_collection: Option<String>,
    /// Set once the user explicitly picks a collection; suppresses the
    /// auto-select-first policy until the category changes again.
    pub user_picked_collection: bool,
    pub detail: Option<CollectionDetail>,
    pub detail_phase: FetchPhase,
    pub collections_generation: u64,
    pub detail_generation: u64,
}

impl NavState {
    pub fn active_category_index(&self) -> Option<usize> {
        let active = self.active_category.as_deref()?;
        self.categories.iter().position(|c| c.id == active)
    }

    pub fn active_collection_index(&self) -> Option<usize> {
        let active = self.active_collection.as_deref()?;
        self.collections.iter().position(|c| c.id == active)
    }

    pub fn active_collection_summary(&self) -> Option<&CollectionSummary> {
        self.active_collection_index().map(|i| &self.collections[i])
    }

    /// Items of the active collection, empty while nothing is loaded.
    pub fn item_count(&self) -> usize {
        self.detail.as_ref().map(|d| d.items.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, order: Option<i64>) -> CollectionSummary {
        CollectionSummary {
            id: format!("col-{}", title.to_lowercase()),
            title: title.to_string(),
            slug: title.to_lowercase(),
            description: None,
            order,
            item_count: 0,
        }
    }

    #[test]
    fn collections_sort_by_order_then_title() {
        let mut collections = vec![
            summary("B", Some(200)),
            summary("A", None),
            summary("C", Some(50)),
        ];
        sort_collections(&mut collections);
        let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn missing_order_defaults_to_one_hundred() {
        let mut collections = vec![
            summary("Zeta", Some(100)),
            summary("Alpha", None),
            summary("Mid", Some(99)),
        ];
        sort_collections(&mut collections);
        let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();
        // Explicit 100 and absent order tie, so the title breaks the tie.
        assert_eq!(titles, ["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn media_items_discriminate_by_kind() {
        let images = MediaItems::Images(vec![ImageItem {
            key: "k1".into(),
            asset: AssetRef { reference: "image-a-1x1-jpg".into(), kind: "reference".into() },
        }]);
        assert_eq!(images.len(), 1);
        assert!(images.images().is_some());
        assert!(images.tracks().is_none());

        let tracks = MediaItems::Tracks(vec![]);
        assert!(tracks.is_empty());
        assert!(tracks.images().is_none());
    }
}
