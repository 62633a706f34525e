use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use alarm_forwarder::logging::init_tracing;
use alarm_forwarder::{transform, AlarmEvent, Forwarder, ForwarderConfig, SnsEnvelope};
use clap::Parser;
use slack_webhook::WebhookClient;

#[derive(Debug, Parser)]
#[command(name = "forward-event")]
#[command(about = "Replay an SNS alarm event through the Slack forwarder")]
struct Args {
    /// SNS event JSON file (reads stdin when omitted)
    #[arg(long)]
    event: Option<PathBuf>,

    /// Print the Slack payload instead of delivering it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = ForwarderConfig::from_env();
    init_tracing(config.log_format);

    let raw = match &args.event {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let envelope: SnsEnvelope = serde_json::from_str(&raw)?;

    if args.dry_run {
        let notification = envelope.first_notification()?;
        let event = AlarmEvent::from_message(&notification.message)?;
        println!("{}", serde_json::to_string_pretty(&transform(&event))?);
        return Ok(());
    }

    let forwarder = Forwarder::from_config(config, WebhookClient::new()?);
    let response = forwarder.handle_envelope(&envelope).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
