//! Icon reference construction
//!
//! Icons are addressed by a numeric id. The retrieval path buckets ids into
//! folders of one thousand, with both the folder and the id zero-padded to
//! six digits: icon `65002` lives at `065000/065002.png`.

use serde::Serialize;

/// Default base URL for icon retrieval
pub const DEFAULT_ICON_BASE_URL: &str = "https://xivapi.com/i";

/// Path (relative to the base URL) substituted when an icon cannot be resolved
pub const FALLBACK_ICON_PATH: &str = "000000/000000.png";

/// Reference to an icon as found in the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub enum IconRef {
    /// Numeric icon id, resolved through [`icon_path`]
    Id(u32),
    /// Fully formed URL supplied by the dataset
    Url(String),
    /// No icon information at all
    #[default]
    Missing,
}

impl IconRef {
    /// Build a reference from the optional dataset fields
    ///
    /// An explicit URL wins over an id, matching how the dataset emits
    /// pre-resolved URLs for container items.
    #[must_use]
    pub fn from_parts(url: Option<String>, id: Option<u32>) -> Self {
        match (url, id) {
            (Some(url), _) if !url.trim().is_empty() => Self::Url(url.trim().to_string()),
            (_, Some(id)) => Self::Id(id),
            _ => Self::Missing,
        }
    }

    /// Resolve the reference to a retrievable URL
    ///
    /// Missing references and URLs that are not retrievable fall back to
    /// [`fallback_url`]. The fallback is local to this one reference.
    #[must_use]
    pub fn resolve(&self, base_url: &str) -> String {
        match self {
            Self::Id(id) => icon_url(base_url, *id),
            Self::Url(url) if is_retrievable(url) => url.clone(),
            Self::Url(url) => {
                tracing::debug!(url = %url, "icon url not retrievable, using fallback");
                fallback_url(base_url)
            }
            Self::Missing => fallback_url(base_url),
        }
    }
}

/// Folder bucket for an icon id (rounded down to the nearest thousand)
#[must_use]
pub const fn icon_folder(id: u32) -> u32 {
    id / 1000 * 1000
}

/// Relative retrieval path for an icon id
///
/// # Examples
///
/// ```
/// use collectr::icon::icon_path;
///
/// assert_eq!(icon_path(65002), "065000/065002.png");
/// assert_eq!(icon_path(6), "000000/000006.png");
/// ```
#[must_use]
pub fn icon_path(id: u32) -> String {
    format!("{:06}/{:06}.png", icon_folder(id), id)
}

/// Full retrieval URL for an icon id
#[must_use]
pub fn icon_url(base_url: &str, id: u32) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), icon_path(id))
}

/// URL of the fallback icon
#[must_use]
pub fn fallback_url(base_url: &str) -> String {
    format!("{}/{FALLBACK_ICON_PATH}", base_url.trim_end_matches('/'))
}

fn is_retrievable(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_folder_rounds_down() {
        assert_eq!(icon_folder(0), 0);
        assert_eq!(icon_folder(999), 0);
        assert_eq!(icon_folder(1000), 1000);
        assert_eq!(icon_folder(61831), 61000);
    }

    #[test]
    fn test_icon_path_zero_pads() {
        assert_eq!(icon_path(65002), "065000/065002.png");
        assert_eq!(icon_path(115), "000000/000115.png");
        assert_eq!(icon_path(123_456), "123000/123456.png");
    }

    #[test]
    fn test_icon_url_trims_trailing_slash() {
        assert_eq!(
            icon_url("https://xivapi.com/i/", 61806),
            "https://xivapi.com/i/061000/061806.png"
        );
    }

    #[test]
    fn test_missing_reference_uses_fallback() {
        assert_eq!(
            IconRef::Missing.resolve(DEFAULT_ICON_BASE_URL),
            "https://xivapi.com/i/000000/000000.png"
        );
    }

    #[test]
    fn test_unretrievable_url_uses_fallback() {
        let icon = IconRef::Url("not a url".to_string());
        assert_eq!(icon.resolve(DEFAULT_ICON_BASE_URL), fallback_url(DEFAULT_ICON_BASE_URL));
    }

    #[test]
    fn test_from_parts_prefers_url() {
        let icon = IconRef::from_parts(Some("https://example.com/a.png".into()), Some(4));
        assert_eq!(icon, IconRef::Url("https://example.com/a.png".into()));

        let icon = IconRef::from_parts(Some("   ".into()), Some(4));
        assert_eq!(icon, IconRef::Id(4));

        assert_eq!(IconRef::from_parts(None, None), IconRef::Missing);
    }
}
