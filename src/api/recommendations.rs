use crate::transport::request::Request;
use crate::types::models::{DataEnvelope, ObjectEnvelope, SuccessEnvelope};
use crate::{Error, Post, RelatedKey, RelatedParams, UserHistory};

fn train_request(uuid: &str, url: &str) -> Request {
    Request::get(["profile"])
        .query_pair("uuid", uuid)
        .query_pair("url", url)
}

fn history_request(uuid: &str) -> Request {
    Request::get(["history"]).query_pair("uuid", uuid)
}

fn related_request(key: &RelatedKey, params: &RelatedParams) -> Request {
    let (name, value) = key.query_pair();
    Request::get(["related"])
        .query_pair(name, value)
        .query_pairs(params.query_pairs())
}

/// Parse.ly recommendation APIs (per-visitor training + related posts).
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct RecommendationsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl RecommendationsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /profile`
    ///
    /// Registers a page view for the visitor uuid; returns whether the
    /// service accepted the training event.
    pub async fn train(&self, uuid: &str, url: &str) -> Result<bool, Error> {
        let env: SuccessEnvelope = self.client.send_json(train_request(uuid, url)).await?;
        Ok(env.success)
    }

    /// `GET /history`
    pub async fn history(&self, uuid: &str) -> Result<UserHistory, Error> {
        let env: ObjectEnvelope<UserHistory> =
            self.client.send_json(history_request(uuid)).await?;
        Ok(env.data)
    }

    /// `GET /related`
    pub async fn related(
        &self,
        key: &RelatedKey,
        params: &RelatedParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(related_request(key, params)).await?;
        Ok(env.data)
    }
}

/// Parse.ly recommendation APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingRecommendationsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingRecommendationsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /profile`
    pub fn train(&self, uuid: &str, url: &str) -> Result<bool, Error> {
        let env: SuccessEnvelope = self.client.send_json(train_request(uuid, url))?;
        Ok(env.success)
    }

    /// `GET /history`
    pub fn history(&self, uuid: &str) -> Result<UserHistory, Error> {
        let env: ObjectEnvelope<UserHistory> = self.client.send_json(history_request(uuid))?;
        Ok(env.data)
    }

    /// `GET /related`
    pub fn related(&self, key: &RelatedKey, params: &RelatedParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(related_request(key, params))?;
        Ok(env.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_request_carries_exactly_one_key() {
        let req = related_request(
            &RelatedKey::Uuid("visitor-1".to_owned()),
            &RelatedParams::default(),
        );
        assert_eq!(req.segments, ["related"]);
        assert!(req.query.contains(&("uuid".to_owned(), "visitor-1".to_owned())));
        assert!(!req.query.iter().any(|(k, _)| k == "url"));
    }
}
