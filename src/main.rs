use critiq_lib::shared::utils::init_logger;
use critiq_lib::shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let config = AppConfig::from_env()?;
    critiq_lib::run(config).await
}
