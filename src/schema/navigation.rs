//! Navigation singleton: header, footer, and social menus.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{LinkField, opt_link};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub id: String,
    pub data: NavigationData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationData {
    pub primary_navigation: Vec<NavEntry>,
    pub secondary_navigation: Vec<NavEntry>,
    pub footer_navigation: Vec<FooterEntry>,
    pub social_links: Vec<NavSocialLink>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NavEntry {
    pub label: Option<String>,
    pub link: Option<LinkField>,
    pub description: Option<String>,
}

/// Footer entries are flat; `section_label` groups them into columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FooterEntry {
    pub section_label: Option<String>,
    pub label: Option<String>,
    pub link: Option<LinkField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NavSocialLink {
    pub label: Option<String>,
    pub link: Option<LinkField>,
    pub icon: Option<String>,
}

impl Navigation {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let navigation = check_navigation(&mut c, value);
        c.finish_with(navigation)
    }
}

pub(crate) fn check_navigation(c: &mut Checker, value: &Value) -> Option<Navigation> {
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
        fn nav_entry(c: &mut Checker, v: &Value) -> Option<NavEntry> {
            let obj = c.object(v)?;
            Some(NavEntry {
                label: c.opt_str(obj, "label"),
                link: opt_link(c, obj, "link"),
                description: c.opt_str(obj, "description"),
            })
        }
        Some(NavigationData {
            primary_navigation: c.opt_arr(obj, "primary_navigation", nav_entry),
            secondary_navigation: c.opt_arr(obj, "secondary_navigation", nav_entry),
            footer_navigation: c.opt_arr(obj, "footer_navigation", |c, v| {
                let obj = c.object(v)?;
                Some(FooterEntry {
                    section_label: c.opt_str(obj, "section_label"),
                    label: c.opt_str(obj, "label"),
                    link: opt_link(c, obj, "link"),
                })
            }),
            social_links: c.opt_arr(obj, "social_links", |c, v| {
                let obj = c.object(v)?;
                Some(NavSocialLink {
                    label: c.opt_str(obj, "label"),
                    link: opt_link(c, obj, "link"),
                    icon: c.opt_str(obj, "icon"),
                })
            }),
        })
    })?;

    Some(Navigation { id: id?, data })
}
