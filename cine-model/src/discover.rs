/// Parameters for `GET /discover/movie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub language: String,
    pub sort_by: String,
    pub include_adult: bool,
    pub include_video: bool,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            page: 1,
            language: "en-US".to_string(),
            sort_by: "popularity.desc".to_string(),
            include_adult: false,
            include_video: false,
        }
    }
}

impl DiscoverQuery {
    pub fn popular(page: u32, language: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            language: language.into(),
            ..Self::default()
        }
    }

    /// Query pairs in the order the endpoint documents them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("include_adult", self.include_adult.to_string()),
            ("include_video", self.include_video.to_string()),
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
            ("sort_by", self.sort_by.clone()),
        ]
    }
}
