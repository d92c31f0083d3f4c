mod model;
pub use model::{EsBackend, EsModel};

pub mod op;
pub use op::Operation;

pub mod query;

use reqwest::{Client, StatusCode};
use serde_json::Value as Json;
use strata_core::{async_trait, config::EsParams, err, Driver, Error, Result};
use url::Url;

/// HTTP client for a search engine node.
#[derive(Debug, Clone)]
pub struct Elasticsearch {
    http: Client,
    base: Url,

    /// Log request and response bodies at `trace` level.
    trace: bool,
}

impl Elasticsearch {
    pub fn new(params: &EsParams) -> Result<Self> {
        let base = Url::parse(&format!("http://{}:{}/", params.host, params.port))
            .map_err(|e| Error::configuration(format!("invalid search engine address: {e}")))?;

        let http = Client::builder().build().map_err(Error::driver)?;

        Ok(Self {
            http,
            base,
            trace: params.trace(),
        })
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    fn url(&self, path: &[String], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.clone();

        url.path_segments_mut()
            .map_err(|_| err!("`{}` cannot carry a path", self.base))?
            .pop_if_empty()
            .extend(path);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Driver for Elasticsearch {
    type Operation = Operation;
    type Response = Json;

    async fn exec(&self, op: Operation) -> Result<Json> {
        let req = op.request();
        let url = self.url(&req.path, &req.query)?;

        tracing::debug!(index = op.index(), method = %req.method, %url, "sending request");

        if self.trace {
            if let Some(body) = &req.body {
                tracing::trace!(%url, %body, "request body");
            }
        }

        let mut builder = self.http.request(req.method, url.clone());
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let res = builder.send().await.map_err(Error::driver)?;

        if res.status() == StatusCode::NOT_FOUND {
            if let Operation::Get(get) = &op {
                return Err(Error::record_not_found(format!(
                    "{}/{}/{}",
                    get.index, get.ty, get.id
                )));
            }
        }

        let res = res.error_for_status().map_err(Error::driver)?;
        let body: Json = res.json().await.map_err(Error::driver)?;

        if self.trace {
            tracing::trace!(%url, %body, "response body");
        }

        Ok(body)
    }
}
