//! Homepage banner domain types.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use super::asset::AssetSource;
use super::catalog::{CatalogEntity, EntityDraft};
use crate::ports::CoreError;

/// A promotional banner shown on the storefront homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    pub alt_text: String,
    pub link_url: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: i32,
}

impl Banner {
    /// Whether the banner should be displayed at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.end_date
    }
}

impl CatalogEntity for Banner {
    const COLLECTION: &'static str = "banners";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Admin form values for creating or editing a banner.
#[derive(Debug, Clone, Default)]
pub struct BannerDraft {
    pub alt_text: String,
    pub link_url: String,
    /// New image. `None` on edit keeps the current image.
    pub image: Option<AssetSource>,
    pub priority: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl EntityDraft for BannerDraft {
    type Entity = Banner;

    fn validate(&self) -> Result<(), CoreError> {
        if self.alt_text.trim().is_empty() {
            return Err(CoreError::Validation("Alt text is required".to_string()));
        }
        if self.link_url.trim().is_empty() {
            return Err(CoreError::Validation("Link URL is required".to_string()));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end <= start {
                return Err(CoreError::Validation(
                    "End date must be after start date".to_string(),
                ));
            }
        }
        if let Some(image) = &self.image {
            image.validate()?;
        }
        Ok(())
    }

    fn take_assets(&mut self) -> Vec<AssetSource> {
        self.image.take().into_iter().collect()
    }

    fn build(self, id: String, assets: Option<Vec<String>>, previous: Option<&Banner>) -> Banner {
        let now = Utc::now();
        let image_url = assets
            .and_then(|urls| urls.into_iter().next())
            .or_else(|| previous.map(|b| b.image_url.clone()))
            .unwrap_or_default();
        let start_date = self
            .start_date
            .or_else(|| previous.map(|b| b.start_date))
            .unwrap_or(now);
        let end_date = self
            .end_date
            .or_else(|| previous.map(|b| b.end_date))
            .unwrap_or_else(|| start_date.checked_add_months(Months::new(12)).unwrap_or(start_date));
        let priority = self
            .priority
            .or_else(|| previous.map(|b| b.priority))
            .unwrap_or(0);

        Banner {
            id,
            image_url,
            alt_text: self.alt_text.trim().to_string(),
            link_url: self.link_url.trim().to_string(),
            start_date,
            end_date,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> BannerDraft {
        BannerDraft {
            alt_text: "Weekend Sale".to_string(),
            link_url: "/products/prod-3".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_banner_defaults_to_one_year_window() {
        let banner = draft().build("b1".to_string(), Some(vec!["https://cdn/b.png".into()]), None);
        assert_eq!(banner.priority, 0);
        assert_eq!(banner.image_url, "https://cdn/b.png");
        let days = (banner.end_date - banner.start_date).num_days();
        assert!((365..=366).contains(&days));
        assert!(banner.is_active_at(banner.start_date));
    }

    #[test]
    fn test_edit_preserves_schedule_and_image() {
        let previous = Banner {
            id: "b1".to_string(),
            image_url: "https://cdn/old.png".to_string(),
            alt_text: "Old".to_string(),
            link_url: "/old".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            priority: 7,
        };

        let banner = draft().build("b1".to_string(), None, Some(&previous));
        assert_eq!(banner.image_url, previous.image_url);
        assert_eq!(banner.start_date, previous.start_date);
        assert_eq!(banner.end_date, previous.end_date);
        assert_eq!(banner.priority, 7);
        assert_eq!(banner.alt_text, "Weekend Sale");
    }

    #[test]
    fn test_validate_rejects_inverted_schedule() {
        let mut d = draft();
        d.start_date = Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        d.end_date = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_serializes_camel_case() {
        let banner = draft().build("b1".to_string(), Some(vec!["u".into()]), None);
        let json = serde_json::to_value(&banner).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("altText").is_some());
        assert!(json.get("linkUrl").is_some());
    }
}
