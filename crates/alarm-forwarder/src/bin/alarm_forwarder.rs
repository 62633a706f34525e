use alarm_forwarder::logging::init_tracing;
use alarm_forwarder::{Forwarder, ForwarderConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use slack_webhook::WebhookClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let config = ForwarderConfig::from_env();
    init_tracing(config.log_format);

    // One connection pool for the lifetime of the execution environment
    let client = WebhookClient::new()?;
    let forwarder = Forwarder::from_config(config, client);
    info!(
        channels = forwarder.directory().channel_count(),
        default_webhook = forwarder.directory().default_url().is_some(),
        "Alarm forwarder ready"
    );

    let forwarder = &forwarder;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        forwarder
            .handle_value(event.payload)
            .await
            .map_err(Error::from)
    }))
    .await
}
