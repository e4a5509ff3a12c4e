//! Seeking Alpha response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::types::Article;

/// Body of `GET /news/v2/list-by-symbol`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsListResponse {
    #[serde(default)]
    pub data: Vec<NewsItem>,
}

/// One entry of the `data` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub attributes: NewsAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAttributes {
    /// RFC 3339 timestamp with offset, e.g. `2024-01-02T08:15:00-05:00`
    pub publish_on: String,
    pub title: String,
}

impl NewsListResponse {
    /// Convert to articles, keeping source order
    ///
    /// Entries whose timestamp does not parse are dropped.
    pub fn into_articles(self) -> Vec<Article> {
        self.data
            .into_iter()
            .filter_map(|item| {
                match DateTime::parse_from_rfc3339(&item.attributes.publish_on) {
                    Ok(published) => Some(Article {
                        published_at: published.with_timezone(&Utc),
                        headline: item.attributes.title,
                    }),
                    Err(e) => {
                        debug!(
                            "Skipping article with bad publishOn {:?}: {}",
                            item.attributes.publish_on, e
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {
                "id": "4061234",
                "type": "news",
                "attributes": {
                    "publishOn": "2024-01-02T08:15:00-05:00",
                    "title": "ACME cuts full-year outlook",
                    "isLockedPro": false
                }
            },
            {
                "id": "4061200",
                "attributes": {
                    "publishOn": "yesterday",
                    "title": "Unparseable date"
                }
            },
            {
                "id": "4061100",
                "attributes": {
                    "publishOn": "2024-01-01T18:00:00-05:00",
                    "title": "ACME to present at conference"
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_convert() {
        let response: NewsListResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.data.len(), 3);

        let articles = response.into_articles();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].headline, "ACME cuts full-year outlook");
        assert_eq!(
            articles[0].published_at,
            "2024-01-02T13:15:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(articles[1].headline, "ACME to present at conference");
    }

    #[test]
    fn test_missing_data_is_empty() {
        let response: NewsListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_articles().is_empty());
    }
}
