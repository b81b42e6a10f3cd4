use subtrack::app;
use subtrack::settings::Settings;
use subtrack::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().expect("Failed to load settings");

    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    app::run(settings).await
}
