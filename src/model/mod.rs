//! Model module - Data structures and state management
//!
//! Contains the application state, the content gateway contract and its
//! HTTP implementation, and the core navigation state machines:
//!
//! - `types`: pane focus and transient UI state
//! - `content`: categories, collections, media items, fetch tiers
//! - `lightbox`: modal image viewer + scroll lock
//! - `gateway`: content store contract and HTTP/JSON client
//! - `assets`: image URL construction from opaque asset references
//! - `app_model`: the aggregate application model

mod app_model;
pub mod assets;
pub mod content;
pub mod gateway;
pub mod lightbox;
mod types;

pub use app_model::{AppModel, FrameState};
pub use assets::ImageUrlBuilder;
pub use content::{
    Bio, Category, CollectionDetail, CollectionSummary, CollectionsFetch, DetailFetch,
    FetchPhase, MediaItems, MediaKind, NavState, TrackItem,
};
pub use gateway::{ContentGateway, GatewayError, HttpGateway};
pub use lightbox::{LightboxView, ScrollLock};
pub use types::{ActivePane, UiState};
