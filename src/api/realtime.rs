use crate::transport::request::Request;
use crate::types::models::DataEnvelope;
use crate::{Aspect, Author, Error, Post, RealtimeParams, Referrer, Section, Tag, Topic};

fn realtime_request(segment: &'static str, params: &RealtimeParams) -> Request {
    Request::get(["realtime", segment]).query_pairs(params.query_pairs())
}

/// Parse.ly realtime APIs (trailing 24 hours).
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct RealtimeService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl RealtimeService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /realtime/posts`
    pub async fn posts(&self, params: &RealtimeParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(realtime_request(Aspect::Posts.as_str(), params))
            .await?;
        Ok(env.data)
    }

    /// `GET /realtime/authors`
    pub async fn authors(&self, params: &RealtimeParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(realtime_request(Aspect::Authors.as_str(), params))
            .await?;
        Ok(env.data)
    }

    /// `GET /realtime/sections`
    pub async fn sections(&self, params: &RealtimeParams) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(realtime_request(Aspect::Sections.as_str(), params))
            .await?;
        Ok(env.data)
    }

    /// `GET /realtime/topics`
    pub async fn topics(&self, params: &RealtimeParams) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(realtime_request(Aspect::Topics.as_str(), params))
            .await?;
        Ok(env.data)
    }

    /// `GET /realtime/tags`
    pub async fn tags(&self, params: &RealtimeParams) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(realtime_request(Aspect::Tags.as_str(), params))
            .await?;
        Ok(env.data)
    }

    /// `GET /realtime/referrers`
    pub async fn referrers(&self, params: &RealtimeParams) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> = self
            .client
            .send_json(realtime_request("referrers", params))
            .await?;
        Ok(env.data)
    }
}

/// Parse.ly realtime APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingRealtimeService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingRealtimeService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /realtime/posts`
    pub fn posts(&self, params: &RealtimeParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(realtime_request(Aspect::Posts.as_str(), params))?;
        Ok(env.data)
    }

    /// `GET /realtime/authors`
    pub fn authors(&self, params: &RealtimeParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(realtime_request(Aspect::Authors.as_str(), params))?;
        Ok(env.data)
    }

    /// `GET /realtime/sections`
    pub fn sections(&self, params: &RealtimeParams) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(realtime_request(Aspect::Sections.as_str(), params))?;
        Ok(env.data)
    }

    /// `GET /realtime/topics`
    pub fn topics(&self, params: &RealtimeParams) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(realtime_request(Aspect::Topics.as_str(), params))?;
        Ok(env.data)
    }

    /// `GET /realtime/tags`
    pub fn tags(&self, params: &RealtimeParams) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(realtime_request(Aspect::Tags.as_str(), params))?;
        Ok(env.data)
    }

    /// `GET /realtime/referrers`
    pub fn referrers(&self, params: &RealtimeParams) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> =
            self.client.send_json(realtime_request("referrers", params))?;
        Ok(env.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RealtimePeriod;

    #[test]
    fn realtime_request_renders_time_window() {
        let params = RealtimeParams {
            period: Some(RealtimePeriod::Minutes(30)),
            ..RealtimeParams::default()
        };
        let req = realtime_request("posts", &params);
        assert_eq!(req.segments, ["realtime", "posts"]);
        assert!(req.query.contains(&("time".to_owned(), "30m".to_owned())));
    }
}
