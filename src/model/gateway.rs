//! Content gateway: the read-only query interface to the headless content
//! store, plus its HTTP/JSON implementation.
//!
//! The rest of the application depends only on the [`ContentGateway`]
//! contract; the concrete [`HttpGateway`] talks plain GET + JSON to the
//! backend and converts the CMS wire documents into domain types.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::content::{
    AssetRef, Bio, Category, CollectionDetail, CollectionSummary, ImageItem,
    MediaAsset, MediaItems, MediaKind, TrackItem,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("portfolio-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("malformed response from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("collection {0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Read-only query contract with the content store.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Distinct categories observed on content. May be empty; the caller
    /// synthesizes a default in that case.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Collections belonging to one category. Ordering is a client-side
    /// concern.
    async fn list_collections(&self, category_slug: &str) -> Result<Vec<CollectionSummary>>;

    /// One collection with its ordered child items.
    async fn collection_detail(&self, collection_id: &str) -> Result<CollectionDetail>;

    /// The artist bio document.
    async fn bio(&self) -> Result<Bio>;
}

// ============================================================================
// Wire documents (CMS field names)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SlugWire {
    current: String,
}

#[derive(Debug, Deserialize)]
struct CategoryWire {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    slug: SlugWire,
}

impl From<CategoryWire> for Category {
    fn from(wire: CategoryWire) -> Self {
        Category { id: wire.id, title: wire.title, slug: wire.slug.current }
    }
}

#[derive(Debug, Deserialize)]
struct CollectionWire {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    slug: SlugWire,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(rename = "imageCount", alias = "mediaCount", default)]
    item_count: u32,
}

impl From<CollectionWire> for CollectionSummary {
    fn from(wire: CollectionWire) -> Self {
        CollectionSummary {
            id: wire.id,
            title: wire.title,
            slug: wire.slug.current,
            description: wire.description,
            order: wire.order,
            item_count: wire.item_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetWire {
    #[serde(rename = "_ref")]
    reference: String,
    #[serde(rename = "_type", default)]
    kind: String,
}

impl From<AssetWire> for AssetRef {
    fn from(wire: AssetWire) -> Self {
        AssetRef { reference: wire.reference, kind: wire.kind }
    }
}

#[derive(Debug, Deserialize)]
struct ImageWire {
    #[serde(rename = "_key")]
    key: String,
    asset: AssetWire,
}

#[derive(Debug, Deserialize)]
struct FileAssetWire {
    #[serde(rename = "_ref", default)]
    reference: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct MediaFileWire {
    asset: FileAssetWire,
}

#[derive(Debug, Deserialize)]
struct CoverWire {
    asset: AssetWire,
}

#[derive(Debug, Deserialize)]
struct TrackWire {
    #[serde(rename = "_key")]
    key: String,
    title: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "mediaType", default)]
    media_type: Option<String>,
    #[serde(rename = "mediaFile")]
    media_file: MediaFileWire,
    #[serde(rename = "coverImage", default)]
    cover_image: Option<CoverWire>,
}

impl From<TrackWire> for TrackItem {
    fn from(wire: TrackWire) -> Self {
        let kind = match wire.media_type.as_deref() {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Audio,
        };
        TrackItem {
            key: wire.key,
            title: wire.title,
            year: wire.year,
            description: wire.description,
            kind,
            media: MediaAsset {
                reference: wire.media_file.asset.reference,
                url: wire.media_file.asset.url,
            },
            cover: wire.cover_image.map(|c| c.asset.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailWire {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    slug: SlugWire,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Option<Vec<ImageWire>>,
    #[serde(default)]
    tracks: Option<Vec<TrackWire>>,
}

impl From<DetailWire> for CollectionDetail {
    fn from(wire: DetailWire) -> Self {
        // Whichever array the document carries selects the item kind; a
        // document with neither is an empty image collection.
        let items = match (wire.images, wire.tracks) {
            (_, Some(tracks)) => MediaItems::Tracks(tracks.into_iter().map(Into::into).collect()),
            (Some(images), None) => MediaItems::Images(images.into_iter().map(|i| ImageItem {
                key: i.key,
                asset: i.asset.into(),
            }).collect()),
            (None, None) => MediaItems::Images(Vec::new()),
        };
        CollectionDetail {
            id: wire.id,
            title: wire.title,
            slug: wire.slug.current,
            description: wire.description,
            items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BioWire {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<Value>,
}

impl From<BioWire> for Bio {
    fn from(wire: BioWire) -> Self {
        Bio {
            title: wire.title.unwrap_or_default(),
            paragraphs: wire.content.as_ref().map(portable_text_paragraphs).unwrap_or_default(),
        }
    }
}

/// Flatten portable-text blocks into plain paragraphs: one paragraph per
/// block, concatenating the text of its children spans.
fn portable_text_paragraphs(content: &Value) -> Vec<String> {
    let Some(blocks) = content.as_array() else {
        return Vec::new();
    };
    blocks
        .iter()
        .filter_map(|block| {
            let children = block.get("children")?.as_array()?;
            let text: String = children
                .iter()
                .filter_map(|span| span.get("text")?.as_str())
                .collect();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// HTTP/JSON gateway against the portfolio backend's read-only API.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(GatewayError::Client)?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    /// Build from `PORTFOLIO_API_URL`, defaulting to a local backend.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("PORTFOLIO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(endpoint = %path, "Gateway request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| GatewayError::Request { endpoint: path.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status { endpoint: path.to_string(), status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GatewayError::Request { endpoint: path.to_string(), source })?;

        serde_json::from_str(&body)
            .map_err(|source| GatewayError::Malformed { endpoint: path.to_string(), source })
    }
}

#[async_trait]
impl ContentGateway for HttpGateway {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let wire: Vec<CategoryWire> = self.get_json("/api/categories").await?;
        Ok(wire.into_iter().map(Into::into).collect())
    }

    async fn list_collections(&self, category_slug: &str) -> Result<Vec<CollectionSummary>> {
        let path = format!("/api/collections?category={}", category_slug);
        let wire: Vec<CollectionWire> = self.get_json(&path).await?;
        Ok(wire.into_iter().map(Into::into).collect())
    }

    async fn collection_detail(&self, collection_id: &str) -> Result<CollectionDetail> {
        let path = format!("/api/collections/{}", collection_id);
        // The backend answers an unknown id with a JSON null document.
        let wire: Option<DetailWire> = self.get_json(&path).await?;
        wire.map(Into::into)
            .ok_or_else(|| GatewayError::NotFound(collection_id.to_string()))
    }

    async fn bio(&self) -> Result<Bio> {
        let wire: Option<BioWire> = self.get_json("/api/bio").await?;
        Ok(wire.map(Into::into).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_list_parses_cms_field_names() {
        let body = r#"[
            {"_id": "c1", "title": "Light Studies", "slug": {"current": "light-studies"},
             "order": 10, "imageCount": 12},
            {"_id": "c2", "title": "Demos", "slug": {"current": "demos"},
             "description": "Early recordings", "mediaCount": 4}
        ]"#;
        let wire: Vec<CollectionWire> = serde_json::from_str(body).unwrap();
        let collections: Vec<CollectionSummary> = wire.into_iter().map(Into::into).collect();
        assert_eq!(collections[0].item_count, 12);
        assert_eq!(collections[0].order, Some(10));
        assert_eq!(collections[1].item_count, 4);
        assert_eq!(collections[1].description.as_deref(), Some("Early recordings"));
        assert_eq!(collections[1].slug, "demos");
    }

    #[test]
    fn detail_with_images_yields_image_items() {
        let body = r#"{
            "_id": "c1", "title": "Light Studies", "slug": {"current": "light-studies"},
            "images": [
                {"_key": "k1", "asset": {"_ref": "image-a1-2000x3000-jpg", "_type": "reference"}},
                {"_key": "k2", "asset": {"_ref": "image-a2-640x480-png", "_type": "reference"}}
            ]
        }"#;
        let detail: CollectionDetail = serde_json::from_str::<DetailWire>(body).unwrap().into();
        let images = detail.items.images().expect("image collection");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].key, "k1");
        assert_eq!(images[1].asset.reference, "image-a2-640x480-png");
    }

    #[test]
    fn detail_with_tracks_yields_track_items() {
        let body = r#"{
            "_id": "c3", "title": "Demos", "slug": {"current": "demos"},
            "tracks": [
                {"_key": "t1", "title": "First Song", "year": 2021, "mediaType": "audio",
                 "mediaFile": {"asset": {"_ref": "file-x1-mp3", "url": "https://cdn.example.com/x1.mp3"}},
                 "coverImage": {"asset": {"_ref": "image-c1-400x400-jpg", "_type": "reference"}}},
                {"_key": "t2", "title": "Session Film", "mediaType": "video",
                 "mediaFile": {"asset": {"url": "https://cdn.example.com/x2.mp4"}}}
            ]
        }"#;
        let detail: CollectionDetail = serde_json::from_str::<DetailWire>(body).unwrap().into();
        let tracks = detail.items.tracks().expect("track collection");
        assert_eq!(tracks[0].kind, MediaKind::Audio);
        assert_eq!(tracks[0].year, Some(2021));
        assert!(tracks[0].cover.is_some());
        assert_eq!(tracks[1].kind, MediaKind::Video);
        assert_eq!(tracks[1].media.url, "https://cdn.example.com/x2.mp4");
        assert!(tracks[1].cover.is_none());
    }

    #[test]
    fn detail_with_neither_array_is_empty() {
        let body = r#"{"_id": "c9", "title": "New", "slug": {"current": "new"}}"#;
        let detail: CollectionDetail = serde_json::from_str::<DetailWire>(body).unwrap().into();
        assert!(detail.items.is_empty());
    }

    #[test]
    fn bio_flattens_portable_text_blocks() {
        let body = r#"{
            "title": "Jane Doe",
            "content": [
                {"_type": "block", "children": [
                    {"_type": "span", "text": "Painter and "},
                    {"_type": "span", "text": "photographer."}
                ]},
                {"_type": "block", "children": []},
                {"_type": "block", "children": [{"_type": "span", "text": "Based in Lisbon."}]}
            ]
        }"#;
        let bio: Bio = serde_json::from_str::<BioWire>(body).unwrap().into();
        assert_eq!(bio.title, "Jane Doe");
        assert_eq!(bio.paragraphs, ["Painter and photographer.", "Based in Lisbon."]);
    }
}
