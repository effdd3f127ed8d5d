use crate::transport::request::Request;
use crate::types::models::DataEnvelope;
use crate::{AnalyticsParams, Aspect, Author, Error, MetaAspect, Post, Section, Tag, Topic};

fn aspect_request(aspect: Aspect, params: &AnalyticsParams) -> Result<Request, Error> {
    Ok(Request::get(["analytics", aspect.as_str()]).query_pairs(params.query_pairs()?))
}

fn post_detail_request(url: &str, days: Option<u32>) -> Request {
    let mut req = Request::get(["analytics", "post", "detail"]).query_pair("url", url);
    if let Some(days) = days {
        req = req.query_pair("days", days.to_string());
    }
    req
}

fn meta_detail_request(
    meta: MetaAspect,
    value: &str,
    params: &AnalyticsParams,
) -> Result<Request, Error> {
    Ok(Request::get(["analytics", meta.as_str(), value, "detail"])
        .query_pairs(params.query_pairs()?))
}

/// Parse.ly analytics APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct AnalyticsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl AnalyticsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /analytics/posts`
    pub async fn posts(&self, params: &AnalyticsParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(aspect_request(Aspect::Posts, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /analytics/authors`
    pub async fn authors(&self, params: &AnalyticsParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(aspect_request(Aspect::Authors, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /analytics/sections`
    pub async fn sections(&self, params: &AnalyticsParams) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(aspect_request(Aspect::Sections, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /analytics/topics`
    pub async fn topics(&self, params: &AnalyticsParams) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(aspect_request(Aspect::Topics, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /analytics/tags`
    pub async fn tags(&self, params: &AnalyticsParams) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(aspect_request(Aspect::Tags, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /analytics/post/detail`
    ///
    /// Returns `None` when the API reports no row for the URL.
    pub async fn post_detail(&self, url: &str, days: Option<u32>) -> Result<Option<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(post_detail_request(url, days)).await?;
        Ok(env.data.into_iter().next())
    }

    /// `GET /analytics/{meta}/{value}/detail`
    pub async fn meta_detail(
        &self,
        meta: MetaAspect,
        value: &str,
        params: &AnalyticsParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_detail_request(meta, value, params)?)
            .await?;
        Ok(env.data)
    }
}

/// Parse.ly analytics APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingAnalyticsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingAnalyticsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /analytics/posts`
    pub fn posts(&self, params: &AnalyticsParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(aspect_request(Aspect::Posts, params)?)?;
        Ok(env.data)
    }

    /// `GET /analytics/authors`
    pub fn authors(&self, params: &AnalyticsParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(aspect_request(Aspect::Authors, params)?)?;
        Ok(env.data)
    }

    /// `GET /analytics/sections`
    pub fn sections(&self, params: &AnalyticsParams) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(aspect_request(Aspect::Sections, params)?)?;
        Ok(env.data)
    }

    /// `GET /analytics/topics`
    pub fn topics(&self, params: &AnalyticsParams) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(aspect_request(Aspect::Topics, params)?)?;
        Ok(env.data)
    }

    /// `GET /analytics/tags`
    pub fn tags(&self, params: &AnalyticsParams) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(aspect_request(Aspect::Tags, params)?)?;
        Ok(env.data)
    }

    /// `GET /analytics/post/detail`
    ///
    /// Returns `None` when the API reports no row for the URL.
    pub fn post_detail(&self, url: &str, days: Option<u32>) -> Result<Option<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(post_detail_request(url, days))?;
        Ok(env.data.into_iter().next())
    }

    /// `GET /analytics/{meta}/{value}/detail`
    pub fn meta_detail(
        &self,
        meta: MetaAspect,
        value: &str,
        params: &AnalyticsParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_detail_request(meta, value, params)?)?;
        Ok(env.data)
    }
}
