use std::net::TcpListener;

use env_logger::Env;
use scout::{configuration::get_configuration, services::GoogleSearch, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the variables may come from the real environment
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    let google_search = GoogleSearch::new(configuration.google)?;

    log::info!("Listening on {}", listener.local_addr()?);
    run(listener, google_search)?.await?;

    Ok(())
}
