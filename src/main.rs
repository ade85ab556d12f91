use config::Config;
use dotenvy::dotenv;

use user_admin::models::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let server_config: ServerConfig = Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default().try_parsing(true))
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("Failed to parse configuration: {e}")))?;

    user_admin::run(server_config).await
}
