use crate::transport::request::Request;
use crate::types::models::DataEnvelope;
use crate::{
    Aspect, Author, Error, MetaAspect, Post, RefType, Referrer, ReferrerDetailParams,
    ReferrerMetaParams, ReferrerParams, ReferrerPostParams, Section, Tag, Topic,
};

fn list_request(ref_type: RefType, params: &ReferrerParams) -> Result<Request, Error> {
    Ok(Request::get(["referrers", ref_type.as_str()]).query_pairs(params.query_pairs()?))
}

fn meta_request(
    ref_type: RefType,
    meta: Aspect,
    params: &ReferrerMetaParams,
) -> Result<Request, Error> {
    Ok(Request::get(["referrers", ref_type.as_str(), meta.as_str()])
        .query_pairs(params.query_pairs()?))
}

fn meta_detail_request(
    ref_type: RefType,
    meta: MetaAspect,
    value: &str,
    params: &ReferrerDetailParams,
) -> Result<Request, Error> {
    Ok(
        Request::get(["referrers", ref_type.as_str(), meta.as_str(), value, "detail"])
            .query_pairs(params.query_pairs()?),
    )
}

fn post_detail_request(url: &str, params: &ReferrerPostParams) -> Result<Request, Error> {
    Ok(Request::get(["referrers", "post", "detail"])
        .query_pair("url", url)
        .query_pairs(params.query_pairs()?))
}

/// The listing payload does not echo the requested referrer type; stamp it
/// onto each decoded row.
fn stamp_ref_type(mut rows: Vec<Referrer>, ref_type: RefType) -> Vec<Referrer> {
    for row in &mut rows {
        row.ref_type = Some(ref_type);
    }
    rows
}

/// Parse.ly referrer APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct ReferrersService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl ReferrersService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /referrers/{ref_type}`
    pub async fn list(
        &self,
        ref_type: RefType,
        params: &ReferrerParams,
    ) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> = self
            .client
            .send_json(list_request(ref_type, params)?)
            .await?;
        Ok(stamp_ref_type(env.data, ref_type))
    }

    /// `GET /referrers/{ref_type}/posts`
    pub async fn meta_posts(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Posts, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/authors`
    pub async fn meta_authors(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Authors, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/sections`
    pub async fn meta_sections(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Sections, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/topics`
    pub async fn meta_topics(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Topics, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/tags`
    pub async fn meta_tags(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Tags, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/{meta}/{value}/detail`
    pub async fn meta_detail(
        &self,
        ref_type: RefType,
        meta: MetaAspect,
        value: &str,
        params: &ReferrerDetailParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_detail_request(ref_type, meta, value, params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /referrers/post/detail`
    pub async fn post_detail(
        &self,
        url: &str,
        params: &ReferrerPostParams,
    ) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> = self
            .client
            .send_json(post_detail_request(url, params)?)
            .await?;
        Ok(env.data)
    }
}

/// Parse.ly referrer APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingReferrersService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingReferrersService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /referrers/{ref_type}`
    pub fn list(&self, ref_type: RefType, params: &ReferrerParams) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> = self.client.send_json(list_request(ref_type, params)?)?;
        Ok(stamp_ref_type(env.data, ref_type))
    }

    /// `GET /referrers/{ref_type}/posts`
    pub fn meta_posts(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Posts, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/authors`
    pub fn meta_authors(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Authors, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/sections`
    pub fn meta_sections(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Section>, Error> {
        let env: DataEnvelope<Section> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Sections, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/topics`
    pub fn meta_topics(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Topic>, Error> {
        let env: DataEnvelope<Topic> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Topics, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/tags`
    pub fn meta_tags(
        &self,
        ref_type: RefType,
        params: &ReferrerMetaParams,
    ) -> Result<Vec<Tag>, Error> {
        let env: DataEnvelope<Tag> = self
            .client
            .send_json(meta_request(ref_type, Aspect::Tags, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/{ref_type}/{meta}/{value}/detail`
    pub fn meta_detail(
        &self,
        ref_type: RefType,
        meta: MetaAspect,
        value: &str,
        params: &ReferrerDetailParams,
    ) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(meta_detail_request(ref_type, meta, value, params)?)?;
        Ok(env.data)
    }

    /// `GET /referrers/post/detail`
    pub fn post_detail(
        &self,
        url: &str,
        params: &ReferrerPostParams,
    ) -> Result<Vec<Referrer>, Error> {
        let env: DataEnvelope<Referrer> = self.client.send_json(post_detail_request(url, params)?)?;
        Ok(env.data)
    }
}
