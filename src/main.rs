use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use vertex_chat::core::config::{self, ChatConfig, CliOverrides};
use vertex_chat::core::state::{ReplyPolicy, Theme};
use vertex_chat::tui;

#[derive(Parser)]
#[command(name = "vertex-chat", about = "Terminal chat with a simulated AI agent")]
struct Args {
    /// Start in light or dark mode
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Simulated reply latency in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// How submissions made while a reply is pending are handled
    #[arg(long, value_enum)]
    reply_policy: Option<ReplyPolicy>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("vertex-chat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}, falling back to defaults");
        ChatConfig::default()
    });
    let cli = CliOverrides {
        theme: args.theme,
        reply_delay_ms: args.reply_delay_ms,
        reply_policy: args.reply_policy,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("vertex-chat starting up: {:?}", resolved);

    tui::run(resolved)
}
