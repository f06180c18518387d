//! Orderbooks hold the resting orders for a single symbol and produce level-1 market data from
//! them. There is no execution: orders are appended on arrival and never leave the book, so the
//! only logic here is how the top of each side is aggregated.
use std::fmt::{Display, Formatter};

use derive_more::Error;
use serde::{Deserialize, Serialize};

pub type OrderId = u64;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Buy,
    Sell,
}

impl Display for OrderAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderAction::Buy => write!(f, "buy"),
            OrderAction::Sell => write!(f, "sell"),
        }
    }
}

/// A resting order. Only created by [Exchange](crate::exchange::Exchange), which owns id
/// assignment, and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub action: OrderAction,
    pub amount: u64,
    /// `None` is a market order.
    pub limit: Option<f64>,
}

impl Order {
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        action: OrderAction,
        amount: u64,
        limit: Option<f64>,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            action,
            amount,
            limit,
        }
    }

    pub fn is_market(&self) -> bool {
        self.limit.is_none()
    }
}

/// Aggregated size at a single price. A `None` price means the level is made of market orders.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Level {
    pub price: Option<f64>,
    pub amount: u64,
}

/// Level-1 snapshot of a book. Each side holds at most one [Level].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketData {
    pub asks: Vec<Level>,
    pub bids: Vec<Level>,
    pub spread: Option<f64>,
}

impl MarketData {
    pub fn best_ask(&self) -> Option<&Level> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&Level> {
        self.bids.first()
    }

    fn from_levels(ask: Option<Level>, bid: Option<Level>) -> Self {
        // Market levels carry no price so any side made of them leaves the spread undefined
        let spread = match (ask.and_then(|l| l.price), bid.and_then(|l| l.price)) {
            (Some(ask_price), Some(bid_price)) => Some(ask_price - bid_price),
            _ => None,
        };

        Self {
            asks: ask.into_iter().collect(),
            bids: bid.into_iter().collect(),
            spread,
        }
    }
}

fn fmt_price(price: Option<f64>) -> String {
    match price {
        Some(val) => val.to_string(),
        None => "N/A".to_string(),
    }
}

fn fmt_level(level: Option<&Level>) -> String {
    match level {
        Some(level) => format!("{}@{}", level.amount, fmt_price(level.price)),
        None => format!("0@{}", fmt_price(None)),
    }
}

impl Display for MarketData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "- {}", fmt_level(self.best_ask()))?;
        writeln!(f, "= {}", fmt_price(self.spread))?;
        write!(f, "+ {}", fmt_level(self.best_bid()))
    }
}

/// Controls how the top level of each side is found.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum AggregationMode {
    /// Price of the first order by arrival, summed over the leading run of orders at that price.
    /// Anything after the first differing price is ignored even if it matches.
    #[default]
    Prefix,
    /// Lowest ask/highest bid across the whole side, summed over every order at that price.
    /// Market orders outrank any limit.
    BestPrice,
}

impl AggregationMode {
    fn aggregate(&self, orders: &[Order], action: OrderAction) -> Option<Level> {
        match self {
            AggregationMode::Prefix => prefix_level(orders),
            AggregationMode::BestPrice => best_price_level(orders, action),
        }
    }
}

fn prefix_level(orders: &[Order]) -> Option<Level> {
    let reference = orders.first()?.limit;
    let amount = orders
        .iter()
        .take_while(|order| order.limit == reference)
        .fold(0, |acc: u64, order| acc.saturating_add(order.amount));
    Some(Level {
        price: reference,
        amount,
    })
}

fn best_price_level(orders: &[Order], action: OrderAction) -> Option<Level> {
    if orders.is_empty() {
        return None;
    }

    let best = if orders.iter().any(Order::is_market) {
        None
    } else {
        orders
            .iter()
            .filter_map(|order| order.limit)
            .reduce(|acc, price| match action {
                OrderAction::Sell => acc.min(price),
                OrderAction::Buy => acc.max(price),
            })
    };

    let amount = orders
        .iter()
        .filter(|order| order.limit == best)
        .fold(0, |acc: u64, order| acc.saturating_add(order.amount));
    Some(Level {
        price: best,
        amount,
    })
}

/// Reasons a [Stock] refuses an order.
#[derive(Clone, Copy, Debug, derive_more::Display, Error, Eq, PartialEq)]
pub enum BookError {
    #[display("order is for a different symbol")]
    WrongSymbol,
    #[display("resting amount on this side would exceed u64::MAX")]
    AmountOverflow,
}

/// Book for a single symbol. Both sides are kept in arrival order and nothing re-sorts them.
///
/// The resting amount on each side always fits in a `u64`, so no level total can overflow.
#[derive(Clone, Debug)]
pub struct Stock {
    symbol: String,
    buy_orders: Vec<Order>,
    sell_orders: Vec<Order>,
    buy_total: u64,
    sell_total: u64,
    aggregation: AggregationMode,
}

impl Stock {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_aggregation(symbol, AggregationMode::default())
    }

    pub fn with_aggregation(symbol: impl Into<String>, aggregation: AggregationMode) -> Self {
        Self {
            symbol: symbol.into(),
            buy_orders: Vec::new(),
            sell_orders: Vec::new(),
            buy_total: 0,
            sell_total: 0,
            aggregation,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn aggregation(&self) -> AggregationMode {
        self.aggregation
    }

    pub fn buy_orders(&self) -> &[Order] {
        &self.buy_orders
    }

    pub fn sell_orders(&self) -> &[Order] {
        &self.sell_orders
    }

    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }

    /// Sum of every order amount resting on one side.
    pub fn resting_amount(&self, action: OrderAction) -> u64 {
        match action {
            OrderAction::Buy => self.buy_total,
            OrderAction::Sell => self.sell_total,
        }
    }

    /// Appends to the side matching the order's action. The book is left unchanged when the
    /// order is refused.
    pub fn insert_order(&mut self, order: Order) -> Result<(), BookError> {
        if order.symbol != self.symbol {
            return Err(BookError::WrongSymbol);
        }

        let (orders, total) = match order.action {
            OrderAction::Buy => (&mut self.buy_orders, &mut self.buy_total),
            OrderAction::Sell => (&mut self.sell_orders, &mut self.sell_total),
        };
        *total = total
            .checked_add(order.amount)
            .ok_or(BookError::AmountOverflow)?;
        orders.push(order);
        Ok(())
    }

    pub fn get_l1_data(&self) -> MarketData {
        let ask = self.aggregation.aggregate(&self.sell_orders, OrderAction::Sell);
        let bid = self.aggregation.aggregate(&self.buy_orders, OrderAction::Buy);
        MarketData::from_levels(ask, bid)
    }
}
