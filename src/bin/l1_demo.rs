use vesta::exchange::Exchange;
use vesta::orderbook::{OrderAction, Stock};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut nasdaq = Exchange::new("nasdaq");
    nasdaq.add_stock(Stock::new("aapl"));

    nasdaq.order("aapl", OrderAction::Buy, 10, Some(100.0))?;
    nasdaq.order("aapl", OrderAction::Sell, 10, Some(125.0))?;
    nasdaq.order("aapl", OrderAction::Sell, 5, Some(125.0))?;
    nasdaq.order("aapl", OrderAction::Sell, 2, Some(130.0))?;

    if let Some(data) = nasdaq.get_l1_data("aapl") {
        println!("{data}");
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}
