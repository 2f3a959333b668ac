//! Site settings singleton: branding, theme colors, SEO defaults.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{ImageField, LinkField, opt_hex_color, opt_image, opt_link};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub id: String,
    pub data: SettingsData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsData {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub tagline: Option<String>,
    pub contact_email: Option<String>,
    pub default_og_image: Option<ImageField>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub typeface_primary: Option<String>,
    pub typeface_secondary: Option<String>,
    pub analytics_provider: Option<String>,
    pub analytics_id: Option<String>,
    pub social_links: Vec<SocialLink>,
    /// Single-entry group in practice; the API still ships it as a list.
    pub seo_defaults: Vec<SeoDefaults>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SocialLink {
    pub label: Option<String>,
    pub url: Option<LinkField>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeoDefaults {
    pub meta_title_suffix: Option<String>,
    pub meta_description: Option<String>,
    pub twitter_handle: Option<String>,
}

impl Settings {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let settings = check_settings(&mut c, value);
        c.finish_with(settings)
    }
}

pub(crate) fn check_settings(c: &mut Checker, value: &Value) -> Option<Settings> {
    let obj = c.object(value)?;
    let id = c.req_str(obj, "id");

    let data_value = match c.opt_field(obj, "data") {
        Some(v) => v,
        None => {
            c.error("data", "required object is missing");
            return None;
        }
    };
    let data = c.scoped("data", |c| {
        let obj = c.object(data_value)?;
        Some(SettingsData {
            site_title: c.opt_str(obj, "site_title"),
            site_description: c.opt_str(obj, "site_description"),
            tagline: c.opt_str(obj, "tagline"),
            contact_email: c.opt_str(obj, "contact_email"),
            default_og_image: opt_image(c, obj, "default_og_image"),
            primary_color: opt_hex_color(c, obj, "primary_color"),
            secondary_color: opt_hex_color(c, obj, "secondary_color"),
            accent_color: opt_hex_color(c, obj, "accent_color"),
            typeface_primary: c.opt_str(obj, "typeface_primary"),
            typeface_secondary: c.opt_str(obj, "typeface_secondary"),
            analytics_provider: c.opt_str(obj, "analytics_provider"),
            analytics_id: c.opt_str(obj, "analytics_id"),
            social_links: c.opt_arr(obj, "social_links", |c, v| {
                let obj = c.object(v)?;
                Some(SocialLink {
                    label: c.opt_str(obj, "label"),
                    url: opt_link(c, obj, "url"),
                    icon: c.opt_str(obj, "icon"),
                })
            }),
            seo_defaults: c.opt_arr(obj, "seo_defaults", |c, v| {
                let obj = c.object(v)?;
                Some(SeoDefaults {
                    meta_title_suffix: c.opt_str(obj, "meta_title_suffix"),
                    meta_description: c.opt_str(obj, "meta_description"),
                    twitter_handle: c.opt_str(obj, "twitter_handle"),
                })
            }),
        })
    })?;

    Some(Settings { id: id?, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_theme_colors() {
        let settings = Settings::validate(&json!({
            "id": "settings_1",
            "data": {
                "site_title": "Alex Rivera",
                "primary_color": "#101014",
                "accent_color": "#6C5CE7",
                "seo_defaults": [{ "meta_title_suffix": " | Alex Rivera" }],
            },
        }))
        .expect("valid settings");

        assert_eq!(settings.data.primary_color.as_deref(), Some("#101014"));
        assert_eq!(settings.data.seo_defaults.len(), 1);
    }

    #[test]
    fn test_bad_color_reports_path() {
        let err = Settings::validate(&json!({
            "id": "settings_1",
            "data": { "accent_color": "purple" },
        }))
        .expect_err("color format is checked");
        assert!(format!("{err}").contains("data.accent_color"), "{err}");
    }
}
