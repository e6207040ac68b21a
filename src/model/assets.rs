//! Image URL construction over opaque asset references.
//!
//! The content store names image assets `image-<assetId>-<WxH>-<format>`;
//! everything else in the application treats that reference as an opaque
//! handle. This builder is the only place that parses it, turning a
//! reference into a fetchable CDN URL with optional resize parameters.

use super::content::AssetRef;

pub const DEFAULT_CDN_URL: &str = "https://cdn.sanity.io/images";
pub const DEFAULT_PROJECT_ID: &str = "demo";
pub const DEFAULT_DATASET: &str = "production";

/// Pure, stateless URL builder for image assets.
#[derive(Clone, Debug)]
pub struct ImageUrlBuilder {
    cdn_url: String,
    project_id: String,
    dataset: String,
}

/// Parsed pieces of an image asset reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAsset<'a> {
    pub asset_id: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: &'a str,
}

impl ImageUrlBuilder {
    pub fn new(cdn_url: impl Into<String>, project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            cdn_url: cdn_url.into(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Build from `PORTFOLIO_CDN_URL`, `PORTFOLIO_PROJECT_ID` and
    /// `PORTFOLIO_DATASET`, with compiled defaults.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("PORTFOLIO_CDN_URL").unwrap_or_else(|_| DEFAULT_CDN_URL.to_string()),
            std::env::var("PORTFOLIO_PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string()),
            std::env::var("PORTFOLIO_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string()),
        )
    }

    /// Parse an `image-<assetId>-<WxH>-<format>` reference. Returns `None`
    /// for anything that does not match, including file (non-image) assets.
    pub fn parse(reference: &str) -> Option<ParsedAsset<'_>> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, format) = rest.rsplit_once('-')?;
        let (asset_id, dims) = rest.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        if asset_id.is_empty() || format.is_empty() {
            return None;
        }
        Some(ParsedAsset {
            asset_id,
            width: w.parse().ok()?,
            height: h.parse().ok()?,
            format,
        })
    }

    /// Intrinsic pixel dimensions recorded in the reference.
    pub fn dimensions(asset: &AssetRef) -> Option<(u32, u32)> {
        Self::parse(&asset.reference).map(|p| (p.width, p.height))
    }

    /// Full-size URL for an image asset.
    pub fn url_for(&self, asset: &AssetRef) -> Option<String> {
        let parsed = Self::parse(&asset.reference)?;
        Some(format!(
            "{}/{}/{}/{}-{}x{}.{}",
            self.cdn_url, self.project_id, self.dataset,
            parsed.asset_id, parsed.width, parsed.height, parsed.format,
        ))
    }

    /// URL for an image asset resized server-side. A missing height lets
    /// the CDN keep the aspect ratio.
    pub fn url_for_sized(&self, asset: &AssetRef, width: u32, height: Option<u32>) -> Option<String> {
        let base = self.url_for(asset)?;
        Some(match height {
            Some(h) => format!("{}?w={}&h={}&fit=crop", base, width, h),
            None => format!("{}?w={}", base, width),
        })
    }
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_URL, DEFAULT_PROJECT_ID, DEFAULT_DATASET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(reference: &str) -> AssetRef {
        AssetRef { reference: reference.to_string(), kind: "reference".to_string() }
    }

    #[test]
    fn builds_full_size_url() {
        let builder = ImageUrlBuilder::new("https://cdn.example.com/images", "p1", "production");
        let url = builder.url_for(&asset("image-abc123-2000x3000-jpg")).unwrap();
        assert_eq!(url, "https://cdn.example.com/images/p1/production/abc123-2000x3000.jpg");
    }

    #[test]
    fn sized_url_carries_resize_parameters() {
        let builder = ImageUrlBuilder::default();
        let url = builder
            .url_for_sized(&asset("image-abc123-2000x3000-jpg"), 400, Some(400))
            .unwrap();
        assert!(url.ends_with("abc123-2000x3000.jpg?w=400&h=400&fit=crop"));

        let url = builder
            .url_for_sized(&asset("image-abc123-2000x3000-jpg"), 1800, None)
            .unwrap();
        assert!(url.ends_with("abc123-2000x3000.jpg?w=1800"));
    }

    #[test]
    fn malformed_references_yield_none() {
        let builder = ImageUrlBuilder::default();
        assert!(builder.url_for(&asset("file-abc123-mp3")).is_none());
        assert!(builder.url_for(&asset("image-abc123-jpg")).is_none());
        assert!(builder.url_for(&asset("image-abc123-axb-jpg")).is_none());
        assert!(builder.url_for(&asset("")).is_none());
    }

    #[test]
    fn dimensions_come_from_the_reference() {
        assert_eq!(
            ImageUrlBuilder::dimensions(&asset("image-abc-640x480-png")),
            Some((640, 480))
        );
        assert_eq!(ImageUrlBuilder::dimensions(&asset("not-an-image")), None);
    }
}
