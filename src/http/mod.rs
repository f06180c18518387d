//! JSON server over a single [Exchange]. The exchange has no synchronization of its own so the
//! server wraps the whole state in one [Mutex] and every request takes it.
use std::future::Future;
use std::sync::Mutex;

use anyhow::Result;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::exchange::{Exchange, ExchangeError};
use crate::orderbook::{MarketData, Order, OrderAction, OrderId, Stock};

pub struct AppState {
    pub exchange: Exchange,
}

impl AppState {
    pub fn new(name: &str) -> Self {
        Self {
            exchange: Exchange::new(name),
        }
    }

    pub fn with_symbols(name: &str, symbols: &[String]) -> Self {
        let mut state = Self::new(name);
        for symbol in symbols {
            state.exchange.add_stock(Stock::new(symbol.as_str()));
        }
        state
    }

    pub fn info(&self) -> InfoResponse {
        InfoResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: self.exchange.name().to_string(),
            symbols: self.exchange.symbols(),
        }
    }

    pub fn add_stock(&mut self, symbol: &str) {
        self.exchange.add_stock(Stock::new(symbol));
    }

    pub fn order(&mut self, req: &OrderRequest) -> Result<Order, ExchangeHttpError> {
        Ok(self
            .exchange
            .order(&req.symbol, req.action, req.amount, req.limit)?)
    }

    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        self.exchange.get_order(order_id).cloned()
    }

    pub fn get_l1_data(&self, symbol: &str) -> Option<MarketData> {
        self.exchange.get_l1_data(symbol)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub name: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AddStockRequest {
    pub symbol: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub action: OrderAction,
    pub amount: u64,
    #[serde(default)]
    pub limit: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct L1Response {
    pub symbol: String,
    pub data: MarketData,
}

#[derive(Debug, Display, Error)]
pub enum ExchangeHttpError {
    UnknownSymbol,
    UnknownOrder,
    InvalidOrder,
    StatePoisoned,
}

impl From<ExchangeError> for ExchangeHttpError {
    fn from(value: ExchangeError) -> Self {
        match value {
            ExchangeError::UnknownSymbol { .. } => ExchangeHttpError::UnknownSymbol,
            ExchangeError::InvalidAmount { .. }
            | ExchangeError::InvalidLimit { .. }
            | ExchangeError::AmountOverflow { .. } => ExchangeHttpError::InvalidOrder,
        }
    }
}

impl actix_web::ResponseError for ExchangeHttpError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ExchangeHttpError::UnknownSymbol => actix_web::http::StatusCode::NOT_FOUND,
            ExchangeHttpError::UnknownOrder => actix_web::http::StatusCode::NOT_FOUND,
            ExchangeHttpError::InvalidOrder => actix_web::http::StatusCode::BAD_REQUEST,
            ExchangeHttpError::StatePoisoned => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub trait Client {
    fn info(&mut self) -> impl Future<Output = Result<InfoResponse>>;
    fn add_stock(&mut self, symbol: String) -> impl Future<Output = Result<()>>;
    fn order(&mut self, req: OrderRequest) -> impl Future<Output = Result<OrderResponse>>;
    fn get_order(&mut self, order_id: OrderId) -> impl Future<Output = Result<OrderResponse>>;
    fn get_l1_data(&mut self, symbol: String) -> impl Future<Output = Result<L1Response>>;
}

pub type ExchangeState = Mutex<AppState>;

pub mod server {
    use std::sync::MutexGuard;

    use actix_web::{get, post, web};
    use log::info;

    use super::{
        AddStockRequest, AppState, ExchangeHttpError, ExchangeState, InfoResponse, L1Response,
        OrderRequest, OrderResponse,
    };
    use crate::orderbook::OrderId;

    fn lock(app: &ExchangeState) -> Result<MutexGuard<'_, AppState>, ExchangeHttpError> {
        app.lock().map_err(|_| ExchangeHttpError::StatePoisoned)
    }

    #[get("/info")]
    pub async fn info(
        app: web::Data<ExchangeState>,
    ) -> Result<web::Json<InfoResponse>, ExchangeHttpError> {
        let state = lock(&app)?;
        Ok(web::Json(state.info()))
    }

    #[post("/add_stock")]
    pub async fn add_stock(
        app: web::Data<ExchangeState>,
        req: web::Json<AddStockRequest>,
    ) -> Result<web::Json<()>, ExchangeHttpError> {
        let mut state = lock(&app)?;
        state.add_stock(&req.symbol);
        Ok(web::Json(()))
    }

    #[post("/order")]
    pub async fn order(
        app: web::Data<ExchangeState>,
        req: web::Json<OrderRequest>,
    ) -> Result<web::Json<OrderResponse>, ExchangeHttpError> {
        let mut state = lock(&app)?;
        let accepted = state.order(&req)?;
        Ok(web::Json(OrderResponse { order: accepted }))
    }

    #[get("/order/{order_id}")]
    pub async fn get_order(
        app: web::Data<ExchangeState>,
        path: web::Path<(OrderId,)>,
    ) -> Result<web::Json<OrderResponse>, ExchangeHttpError> {
        let state = lock(&app)?;
        let (order_id,) = path.into_inner();

        if let Some(found) = state.get_order(order_id) {
            Ok(web::Json(OrderResponse { order: found }))
        } else {
            Err(ExchangeHttpError::UnknownOrder)
        }
    }

    #[get("/l1/{symbol}")]
    pub async fn get_l1_data(
        app: web::Data<ExchangeState>,
        path: web::Path<(String,)>,
    ) -> Result<web::Json<L1Response>, ExchangeHttpError> {
        let state = lock(&app)?;
        let (symbol,) = path.into_inner();

        if let Some(data) = state.get_l1_data(&symbol) {
            Ok(web::Json(L1Response { symbol, data }))
        } else {
            info!("SERVER: L1 request for unlisted symbol {:?}", symbol);
            Err(ExchangeHttpError::UnknownSymbol)
        }
    }
}
