//! Mapping internal content UUIDs to public URLs.

use super::models::RelatedContent;

pub const DEFAULT_CONTENT_PATH: &str = "content";
pub const DEFAULT_THING_PATH: &str = "things";

/// Builds the resource URL (`apiURL`) and the thing URL (`id`) for a UUID.
///
/// Both hosts and both path segments are configuration. By default the
/// thing URL shares the resource host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMapper {
    api_base: String,
    thing_base: String,
    content_path: String,
    thing_path: String,
}

impl IdentityMapper {
    pub fn new(base_url: &str) -> Self {
        let base = trim_base(base_url);
        Self {
            api_base: base.clone(),
            thing_base: base,
            content_path: DEFAULT_CONTENT_PATH.to_string(),
            thing_path: DEFAULT_THING_PATH.to_string(),
        }
    }

    /// Use a separate host for thing URLs.
    pub fn with_thing_base_url(mut self, base_url: &str) -> Self {
        self.thing_base = trim_base(base_url);
        self
    }

    pub fn with_paths(mut self, content_path: &str, thing_path: &str) -> Self {
        self.content_path = content_path.trim_matches('/').to_string();
        self.thing_path = thing_path.trim_matches('/').to_string();
        self
    }

    pub fn api_url(&self, uuid: &str) -> String {
        format!("{}/{}/{}", self.api_base, self.content_path, uuid)
    }

    pub fn thing_url(&self, uuid: &str) -> String {
        format!("{}/{}/{}", self.thing_base, self.thing_path, uuid)
    }

    pub fn related_content(&self, uuid: &str) -> RelatedContent {
        RelatedContent {
            id: self.thing_url(uuid),
            api_url: self.api_url(uuid),
        }
    }

    pub fn related_contents(&self, uuids: &[String]) -> Vec<RelatedContent> {
        uuids.iter().map(|u| self.related_content(u)).collect()
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
