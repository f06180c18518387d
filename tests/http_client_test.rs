use std::sync::Mutex;

use actix_web::{web, App, HttpServer};
use vesta::client::HttpClient;
use vesta::http::server::{add_stock, get_l1_data, get_order, info, order};
use vesta::http::{AppState, Client, OrderRequest};
use vesta::orderbook::{Level, OrderAction};

#[actix_web::test]
async fn test_that_http_client_round_trips() -> anyhow::Result<()> {
    let exchange_state = web::Data::new(Mutex::new(AppState::new("nasdaq")));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(exchange_state.clone())
            .service(info)
            .service(add_stock)
            .service(order)
            .service(get_order)
            .service(get_l1_data)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let mut client = HttpClient::new(format!("http://{addr}"));
    client.add_stock("aapl".to_string()).await?;

    let buy = client
        .order(OrderRequest {
            symbol: "aapl".to_string(),
            action: OrderAction::Buy,
            amount: 10,
            limit: Some(100.0),
        })
        .await?;
    assert_eq!(buy.order.id, 0);

    client
        .order(OrderRequest {
            symbol: "aapl".to_string(),
            action: OrderAction::Sell,
            amount: 10,
            limit: Some(125.0),
        })
        .await?;

    let l1 = client.get_l1_data("aapl".to_string()).await?;
    assert_eq!(l1.data.spread, Some(25.0));
    assert_eq!(
        l1.data.best_ask(),
        Some(&Level {
            price: Some(125.0),
            amount: 10
        })
    );

    let fetched = client.get_order(0).await?;
    assert_eq!(fetched.order, buy.order);

    //Unlisted symbol comes back as a 404 which the client turns into an error
    assert!(client.get_l1_data("msft".to_string()).await.is_err());
    assert!(client
        .order(OrderRequest {
            symbol: "msft".to_string(),
            action: OrderAction::Buy,
            amount: 1,
            limit: None,
        })
        .await
        .is_err());

    //Reserved url characters in a symbol must survive the round trip
    let odd = "brk/b?x#1".to_string();
    client.add_stock(odd.clone()).await?;
    client
        .order(OrderRequest {
            symbol: odd.clone(),
            action: OrderAction::Sell,
            amount: 4,
            limit: Some(410.0),
        })
        .await?;
    let odd_l1 = client.get_l1_data(odd.clone()).await?;
    assert_eq!(odd_l1.symbol, odd);
    assert_eq!(
        odd_l1.data.best_ask(),
        Some(&Level {
            price: Some(410.0),
            amount: 4
        })
    );

    let listed = client.info().await?;
    assert_eq!(listed.symbols, vec!["aapl".to_string(), odd]);

    handle.stop(true).await;
    Ok(())
}
