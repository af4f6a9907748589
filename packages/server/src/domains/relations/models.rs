use serde::{Deserialize, Serialize};

/// Public projection of a Content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedContent {
    /// Thing URL identifying the content.
    pub id: String,
    /// Resource URL the content can be fetched from.
    #[serde(rename = "apiURL")]
    pub api_url: String,
}

/// Relations of a single piece of content. Every list is in edge order and
/// is serialized as `[]` when empty, never omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRelations {
    pub curated_related_contents: Vec<RelatedContent>,
    pub contains: Vec<RelatedContent>,
    pub contained_in: Vec<RelatedContent>,
}

/// Relations of a content collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRelations {
    /// UUID of the containing package, or empty when there is none.
    pub contained_in: String,
    pub contains: Vec<String>,
}

/// Relations together with whether anything relevant matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub relations: T,
    pub found: bool,
}

impl<T> Resolved<T> {
    pub fn into_found(self) -> Option<T> {
        self.found.then_some(self.relations)
    }
}
