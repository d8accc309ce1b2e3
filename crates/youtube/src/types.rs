use serde::{Deserialize, Serialize};

/// Watch page prefix for a video id
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A video returned by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoHit {
    pub video_id: String,
    pub title: Option<String>,
    pub channel: Option<String>,
}

impl VideoHit {
    pub fn url(&self) -> String {
        format!("{}{}", WATCH_URL_PREFIX, self.video_id)
    }
}

/// `search.list` response, reduced to what is read
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
}

impl SearchResponse {
    /// First item that is actually a video
    pub fn first_video(self) -> Option<VideoHit> {
        self.items.into_iter().find_map(|item| {
            let video_id = item.id.video_id?;
            let snippet = item.snippet;
            Some(VideoHit {
                video_id,
                title: snippet.as_ref().and_then(|s| s.title.clone()),
                channel: snippet.and_then(|s| s.channel_title),
            })
        })
    }
}
