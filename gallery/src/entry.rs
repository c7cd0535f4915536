use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const DEFAULT_THUMBNAIL: &str = "/placeholder_thumb.png";

/// One media item's record in the gallery manifest. Fields other tools have
/// added to an entry are carried through `extra` so a rewrite never drops
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub date: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaEntry {
    /// A fresh entry for a just-ingested file. `url` is the local gallery
    /// url of the stored copy, not the source path.
    pub fn new(original_filename: &str, url: String) -> Self {
        MediaEntry {
            id: Uuid::new_v4().to_string(),
            title: title_from_filename(original_filename),
            url,
            thumbnail: DEFAULT_THUMBNAIL.to_owned(),
            date: Utc::now().to_rfc3339(),
            tags: vec!["UPLOADED".to_owned()],
            extra: Map::new(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.url.starts_with(super::LOCAL_URL_PREFIX)
    }
}

/// Display title from a filename: extension stripped, separators turned
/// into spaces, each word capitalized.
pub fn title_from_filename(name: &str) -> String {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collision-free stored name: random 8-char token, underscore, original
/// filename. Consumers must treat the result as opaque.
pub fn unique_name(original_filename: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}_{}", &token[..8], original_filename)
}
