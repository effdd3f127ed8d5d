//! Response records returned by the Parse.ly API.
//!
//! Every field is optional: the API omits fields it has no value for, and
//! missing fields decode to `None`.

use crate::types::params::RefType;
use serde::{Deserialize, Serialize};

/// A post row from the analytics, shares, realtime, related and search
/// endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Post {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
    #[serde(default, rename = "_shares")]
    pub shares: Option<u64>,
    #[serde(default)]
    pub visitors: Option<u64>,
    #[serde(default)]
    pub thumb_url_medium: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Publisher-supplied metadata, passed through verbatim.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// An author row; the name arrives in the `author` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Author {
    #[serde(default, rename = "author")]
    pub name: Option<String>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
}

/// A section row; the name arrives in the `section` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Section {
    #[serde(default, rename = "section")]
    pub name: Option<String>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
}

/// A topic row; the name arrives in the `topic` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Topic {
    #[serde(default, rename = "topic")]
    pub name: Option<String>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
}

/// A tag row; the name arrives in the `tag` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Tag {
    #[serde(default, rename = "tag")]
    pub name: Option<String>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
}

/// A traffic-source row.
///
/// The wire payload does not echo the requested referrer type on listing
/// endpoints; the client stamps it after decoding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Referrer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "_hits")]
    pub hits: Option<u64>,
    #[serde(default, alias = "type")]
    pub ref_type: Option<RefType>,
}

/// Per-network share counts for a single post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Shares {
    #[serde(default, rename = "tw")]
    pub twitter: Option<u64>,
    #[serde(default, rename = "fb")]
    pub facebook: Option<u64>,
    #[serde(default, rename = "pi")]
    pub pinterest: Option<u64>,
    #[serde(default, rename = "li")]
    pub linkedin: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Training history for a visitor uuid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct UserHistory {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Standard `{"data": [...]}` listing envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default)]
    pub(crate) data: Vec<T>,
}

/// `{"data": {...}}` envelope used by `/history`.
#[derive(Debug, Deserialize)]
pub(crate) struct ObjectEnvelope<T> {
    pub(crate) data: T,
}

/// `{"success": ...}` envelope used by `/profile`.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessEnvelope {
    #[serde(default)]
    pub(crate) success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_maps_prefixed_counters() {
        let post: Post = serde_json::from_value(json!({
            "url": "https://example.com/a",
            "title": "A",
            "_hits": 1200,
            "_shares": 34,
            "tags": ["tech"]
        }))
        .unwrap();
        assert_eq!(post.hits, Some(1200));
        assert_eq!(post.shares, Some(34));
        assert_eq!(post.tags.as_deref(), Some(&["tech".to_owned()][..]));
        assert_eq!(post.author, None);
    }

    #[test]
    fn aspect_rows_read_name_from_aspect_field() {
        let author: Author =
            serde_json::from_value(json!({"author": "Ars Staff", "_hits": 9})).unwrap();
        assert_eq!(author.name.as_deref(), Some("Ars Staff"));

        let topic: Topic = serde_json::from_value(json!({"topic": "Security"})).unwrap();
        assert_eq!(topic.name.as_deref(), Some("Security"));
        assert_eq!(topic.hits, None);
    }

    #[test]
    fn referrer_accepts_type_alias() {
        let referrer: Referrer =
            serde_json::from_value(json!({"name": "twitter.com", "type": "social"})).unwrap();
        assert_eq!(referrer.ref_type, Some(RefType::Social));
    }

    #[test]
    fn shares_renames_network_fields() {
        let shares: Shares =
            serde_json::from_value(json!({"tw": 4, "fb": 2, "total": 6})).unwrap();
        assert_eq!(shares.twitter, Some(4));
        assert_eq!(shares.facebook, Some(2));
        assert_eq!(shares.pinterest, None);
        assert_eq!(shares.total, Some(6));
    }

    #[test]
    fn envelope_defaults_to_empty_data() {
        let env: DataEnvelope<Post> = serde_json::from_value(json!({})).unwrap();
        assert!(env.data.is_empty());
    }
}
