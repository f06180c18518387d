//! The exchange is the interface presented to callers. It owns one [Stock] per symbol, hands out
//! order ids, and routes each order to the right book. Aggregation of market data is left to the
//! orderbook.
use std::collections::HashMap;

use derive_more::{Display, Error};
use log::{info, warn};

use crate::orderbook::{BookError, MarketData, Order, OrderAction, OrderId, Stock};

/// Reasons an order submission is rejected. No id is consumed when any of these are returned.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum ExchangeError {
    #[display("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },
    #[display("order amount must be positive, got {amount}")]
    InvalidAmount { amount: u64 },
    #[display("order limit must be a finite non-negative price, got {limit}")]
    InvalidLimit { limit: f64 },
    #[display("resting {action} amount for {symbol} would exceed u64::MAX")]
    AmountOverflow { symbol: String, action: OrderAction },
}

/// Checks the fields that do not depend on the book. Returns the limit to store, with `-0.0`
/// folded into `0.0`.
fn validate_fields(amount: u64, limit: Option<f64>) -> Result<Option<f64>, ExchangeError> {
    if amount == 0 {
        return Err(ExchangeError::InvalidAmount { amount });
    }

    match limit {
        Some(limit) if !limit.is_finite() || limit < 0.0 => {
            Err(ExchangeError::InvalidLimit { limit })
        }
        Some(limit) if limit == 0.0 => Ok(Some(0.0)),
        _ => Ok(limit),
    }
}

/// Registry of books and orders. Single-threaded: anything sharing an exchange across threads
/// has to bring its own lock, as the server in [http](crate::http) does.
#[derive(Debug)]
pub struct Exchange {
    name: String,
    stocks: HashMap<String, Stock>,
    orders: HashMap<OrderId, Order>,
    next_order_id: OrderId,
}

impl Exchange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stocks: HashMap::new(),
            orders: HashMap::new(),
            next_order_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    pub fn get_stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.stocks.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Registering a symbol that already exists is ignored and the first book is kept.
    pub fn add_stock(&mut self, stock: Stock) {
        if stock.symbol().is_empty() {
            warn!("EXCHANGE: {} ignored stock with empty symbol", self.name);
            return;
        }

        if self.stocks.contains_key(stock.symbol()) {
            info!(
                "EXCHANGE: {} already lists {:?}, ignoring",
                self.name,
                stock.symbol()
            );
            return;
        }

        info!("EXCHANGE: {} listing {:?}", self.name, stock.symbol());
        self.stocks.insert(stock.symbol().to_string(), stock);
    }

    fn try_order(
        &mut self,
        symbol: &str,
        action: OrderAction,
        amount: u64,
        limit: Option<f64>,
    ) -> Result<Order, ExchangeError> {
        let stock = self
            .stocks
            .get_mut(symbol)
            .ok_or_else(|| ExchangeError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;
        let limit = validate_fields(amount, limit)?;

        let order = Order::new(self.next_order_id, symbol, action, amount, limit);
        stock
            .insert_order(order.clone())
            .map_err(|err| match err {
                BookError::AmountOverflow => ExchangeError::AmountOverflow {
                    symbol: symbol.to_string(),
                    action,
                },
                // Books are keyed by their own symbol
                BookError::WrongSymbol => ExchangeError::UnknownSymbol {
                    symbol: symbol.to_string(),
                },
            })?;

        self.next_order_id += 1;
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn order(
        &mut self,
        symbol: &str,
        action: OrderAction,
        amount: u64,
        limit: Option<f64>,
    ) -> Result<Order, ExchangeError> {
        match self.try_order(symbol, action, amount, limit) {
            Ok(order) => {
                info!(
                    "EXCHANGE: {} accepted order {} {} {:?} x {} @ {:?}",
                    self.name, order.id, order.action, order.symbol, order.amount, order.limit
                );
                Ok(order)
            }
            Err(err) => {
                info!("EXCHANGE: {} rejected {} order: {}", self.name, action, err);
                Err(err)
            }
        }
    }

    pub fn get_l1_data(&self, symbol: &str) -> Option<MarketData> {
        self.stocks.get(symbol).map(Stock::get_l1_data)
    }
}
