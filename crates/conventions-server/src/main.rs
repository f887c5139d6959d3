use std::error::Error;

use conventions_server::{Config, start_server};
use envconfig::Envconfig;

fn init_log(directives: &str) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(directives),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::init_from_env()?;
    init_log(&config.log);
    start_server(config).await?;
    Ok(())
}
