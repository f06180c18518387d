//! # What is Vesta?
//!
//! Vesta is a minimal exchange. Clients list symbols, rest buy and sell orders against them, and
//! read back level-1 market data: the best bid and ask, the size resting at each, and the spread.
//! Nothing executes. Orders are never filled or cancelled, they just sit in the book in the order
//! they arrived.
//!
//! # Implementation
//!
//! - An orderbook, [Stock](crate::orderbook::Stock), holds the orders for one symbol and builds
//! [MarketData](crate::orderbook::MarketData) from them on every query. By default the top of
//! each side is the price of the first order to arrive, summed over the run of orders directly
//! behind it at that price. [AggregationMode](crate::orderbook::AggregationMode) switches to a
//! scan for the true best price.
//! - An exchange, [Exchange](crate::exchange::Exchange), which lists symbols, validates and
//! numbers incoming orders, and routes them to the right book.
//! - A JSON server over a single exchange in [http](crate::http), and clients for it in
//! [client](crate::client).
//!
//! The exchange is single-threaded. The server wraps it in a Mutex, and that is the only
//! synchronization anywhere.
//!
//! ``
//! cargo run --bin exchange_server [ipv4_address] [port] [exchange_name] [symbols...]
//! ``
pub mod client;
pub mod config;
pub mod exchange;
pub mod http;
pub mod orderbook;
