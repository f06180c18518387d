use anyhow::{anyhow, Context, Result};

pub const DEFAULT_EXCHANGE_NAME: &str = "vesta";

/// Server settings read from positional arguments:
/// `<address> <port> [exchange_name] [symbol ...]`
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub name: String,
    pub symbols: Vec<String>,
}

impl ServerConfig {
    /// Expects the program name to have been stripped already.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let address = args
            .next()
            .ok_or_else(|| anyhow!("missing address, usage: <address> <port> [name] [symbols...]"))?;
        let port = args
            .next()
            .ok_or_else(|| anyhow!("missing port, usage: <address> <port> [name] [symbols...]"))?;
        let port: u16 = port
            .parse()
            .with_context(|| format!("invalid port {port:?}"))?;
        let name = args
            .next()
            .unwrap_or_else(|| DEFAULT_EXCHANGE_NAME.to_string());
        let symbols = args.collect();

        Ok(Self {
            address,
            port,
            name,
            symbols,
        })
    }
}
