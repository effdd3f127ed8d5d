use crate::transport::request::Request;
use crate::types::models::DataEnvelope;
use crate::{Author, Error, Post, Shares, SharesParams};

fn listing_request(aspect: &'static str, params: &SharesParams) -> Result<Request, Error> {
    Ok(Request::get(["shares", aspect]).query_pairs(params.query_pairs()?))
}

fn post_detail_request(url: &str) -> Request {
    Request::get(["shares", "post", "detail"]).query_pair("url", url)
}

/// Parse.ly social share APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SharesService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SharesService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /shares/posts`
    pub async fn posts(&self, params: &SharesParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self
            .client
            .send_json(listing_request("posts", params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /shares/authors`
    pub async fn authors(&self, params: &SharesParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self
            .client
            .send_json(listing_request("authors", params)?)
            .await?;
        Ok(env.data)
    }

    /// `GET /shares/post/detail`
    ///
    /// Returns `None` when the API reports no row for the URL.
    pub async fn post_detail(&self, url: &str) -> Result<Option<Shares>, Error> {
        let env: DataEnvelope<Shares> = self.client.send_json(post_detail_request(url)).await?;
        Ok(env.data.into_iter().next())
    }
}

/// Parse.ly social share APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingSharesService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSharesService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /shares/posts`
    pub fn posts(&self, params: &SharesParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(listing_request("posts", params)?)?;
        Ok(env.data)
    }

    /// `GET /shares/authors`
    pub fn authors(&self, params: &SharesParams) -> Result<Vec<Author>, Error> {
        let env: DataEnvelope<Author> = self.client.send_json(listing_request("authors", params)?)?;
        Ok(env.data)
    }

    /// `GET /shares/post/detail`
    ///
    /// Returns `None` when the API reports no row for the URL.
    pub fn post_detail(&self, url: &str) -> Result<Option<Shares>, Error> {
        let env: DataEnvelope<Shares> = self.client.send_json(post_detail_request(url))?;
        Ok(env.data.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_request_passes_caller_paging_through() {
        let params = SharesParams {
            limit: 25,
            page: 3,
            ..SharesParams::default()
        };
        let req = listing_request("posts", &params).unwrap();
        assert!(req.query.contains(&("limit".to_owned(), "25".to_owned())));
        assert!(req.query.contains(&("page".to_owned(), "3".to_owned())));
    }
}
