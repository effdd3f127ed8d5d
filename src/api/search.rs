use crate::transport::request::Request;
use crate::types::models::DataEnvelope;
use crate::{Error, Post, SearchParams};

fn search_request(query: &str, params: &SearchParams) -> Request {
    Request::get(["search"])
        .query_pair("q", query)
        .query_pairs(params.query_pairs())
}

/// Parse.ly full-text search API.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SearchService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SearchService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /search`
    pub async fn query(&self, query: &str, params: &SearchParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(search_request(query, params)).await?;
        Ok(env.data)
    }
}

/// Parse.ly full-text search API (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingSearchService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSearchService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /search`
    pub fn query(&self, query: &str, params: &SearchParams) -> Result<Vec<Post>, Error> {
        let env: DataEnvelope<Post> = self.client.send_json(search_request(query, params))?;
        Ok(env.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metric;

    #[test]
    fn search_request_carries_query_and_boost() {
        let params = SearchParams {
            boost: Metric::VisitorsNew,
            ..SearchParams::default()
        };
        let req = search_request("security", &params);
        assert_eq!(req.segments, ["search"]);
        assert!(req.query.contains(&("q".to_owned(), "security".to_owned())));
        assert!(req
            .query
            .contains(&("boost".to_owned(), "visitors_new".to_owned())));
    }
}
