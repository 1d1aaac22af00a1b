use waitlist_intake::configuration::get_configuration;
use waitlist_intake::startup::Application;
use waitlist_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("waitlist-intake".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
