use serde::{Deserialize, Serialize};

/// Embedded video attached to a recipe, tagged by hosting platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Video {
    /// YouTube embed, addressed by video id
    Youtube {
        id: String,
        #[serde(default)]
        title: Option<String>,
    },
    /// Instagram post embed, addressed by post url
    Instagram {
        url: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl Video {
    pub fn title(&self) -> Option<&str> {
        match self {
            Video::Youtube { title, .. } | Video::Instagram { title, .. } => title.as_deref(),
        }
    }
}
