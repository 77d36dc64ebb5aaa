use clap::Parser;
use tokio::net::TcpListener;

use vitrine::logger::Logger;
use vitrine::{Args, BrowserError, Config};

#[tokio::main]
async fn main() -> Result<(), BrowserError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_args(Args::parse())?;
    let app = vitrine::router(config.state());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Serving {:?} on http://{}", config.root_dir, addr);
    axum::serve(listener, app).await.map_err(BrowserError::from)
}
