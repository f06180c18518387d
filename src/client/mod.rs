use std::future::{self, Future};

use anyhow::{anyhow, Error, Result};
use reqwest::Url;

use crate::http::{
    AddStockRequest, AppState, Client, ExchangeHttpError, InfoResponse, L1Response, OrderRequest,
    OrderResponse,
};
use crate::orderbook::OrderId;

#[derive(Debug)]
pub struct HttpClient {
    pub path: String,
    pub client: reqwest::Client,
}

impl Client for HttpClient {
    async fn info(&mut self) -> Result<InfoResponse> {
        Ok(self
            .client
            .get(self.url(&["info"])?)
            .send()
            .await?
            .error_for_status()?
            .json::<InfoResponse>()
            .await?)
    }

    async fn add_stock(&mut self, symbol: String) -> Result<()> {
        let req = AddStockRequest { symbol };
        Ok(self
            .client
            .post(self.url(&["add_stock"])?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<()>()
            .await?)
    }

    async fn order(&mut self, req: OrderRequest) -> Result<OrderResponse> {
        Ok(self
            .client
            .post(self.url(&["order"])?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<OrderResponse>()
            .await?)
    }

    async fn get_order(&mut self, order_id: OrderId) -> Result<OrderResponse> {
        Ok(self
            .client
            .get(self.url(&["order", &order_id.to_string()])?)
            .send()
            .await?
            .error_for_status()?
            .json::<OrderResponse>()
            .await?)
    }

    async fn get_l1_data(&mut self, symbol: String) -> Result<L1Response> {
        Ok(self
            .client
            .get(self.url(&["l1", &symbol])?)
            .send()
            .await?
            .error_for_status()?
            .json::<L1Response>()
            .await?)
    }
}

impl HttpClient {
    pub fn new(path: String) -> Self {
        Self {
            path,
            client: reqwest::Client::new(),
        }
    }

    /// Appends each segment to the base path, percent-encoding it so symbols containing `/`,
    /// `?` or `#` stay a single segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.path)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be used as a base url", self.path))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Runs calls directly against an [AppState] without a server, for tests and local scripts.
pub struct TestClient {
    state: AppState,
}

impl Client for TestClient {
    fn info(&mut self) -> impl Future<Output = Result<InfoResponse>> {
        future::ready(Ok(self.state.info()))
    }

    fn add_stock(&mut self, symbol: String) -> impl Future<Output = Result<()>> {
        self.state.add_stock(&symbol);
        future::ready(Ok(()))
    }

    fn order(&mut self, req: OrderRequest) -> impl Future<Output = Result<OrderResponse>> {
        let res = self
            .state
            .order(&req)
            .map(|order| OrderResponse { order })
            .map_err(Error::new);
        future::ready(res)
    }

    fn get_order(&mut self, order_id: OrderId) -> impl Future<Output = Result<OrderResponse>> {
        if let Some(order) = self.state.get_order(order_id) {
            future::ready(Ok(OrderResponse { order }))
        } else {
            future::ready(Err(Error::new(ExchangeHttpError::UnknownOrder)))
        }
    }

    fn get_l1_data(&mut self, symbol: String) -> impl Future<Output = Result<L1Response>> {
        if let Some(data) = self.state.get_l1_data(&symbol) {
            future::ready(Ok(L1Response { symbol, data }))
        } else {
            future::ready(Err(Error::new(ExchangeHttpError::UnknownSymbol)))
        }
    }
}

impl TestClient {
    pub fn new(name: &str) -> Self {
        Self {
            state: AppState::new(name),
        }
    }

    pub fn with_symbols(name: &str, symbols: &[String]) -> Self {
        Self {
            state: AppState::with_symbols(name, symbols),
        }
    }
}
