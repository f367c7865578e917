use serde::{Deserialize, Deserializer, Serialize};

use crate::video::Video;

/// One recipe document as stored on disk (camelCase JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "known_videos")]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub featured: bool,
}

/// External link attached to a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

/// Videos with an unrecognized platform tag are dropped, not treated as a
/// malformed document.
fn known_videos<'de, D>(deserializer: D) -> Result<Vec<Video>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}
