use clap::Parser;
use spinguard::Spinguard;
use spinguard::config::AppConfig;
use spinguard::shell;

mod args;
use args::{Args, convert_persona};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting analysis for: {}", args.url);

    // Load configuration, with CLI overrides on top
    let mut config = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config from {}: {}", path, e);
                eprintln!("Failed to load config from {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => AppConfig::default(),
    };
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }

    if !args.snapshot_only && config.llm.api_key.is_empty() {
        println!("Note: the model call needs an API key.");
        println!("Set OPENROUTER_API_KEY or the llm.api_key field in your config file.");
    }

    let start_time = std::time::Instant::now();

    let outcome = Spinguard::new()
        .with_config(config)
        .with_persona(convert_persona(args.persona))
        .snapshot_only(args.snapshot_only)
        .analyze(&args.url)
        .await;

    match outcome {
        Ok(outcome) => {
            match &outcome.report {
                Some(report) => print!("{}", shell::render_report(&outcome.snapshot, report)),
                None => print!("{}", shell::render_snapshot(&outcome.snapshot)),
            }
            ::log::info!(
                "Analysis complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            ::log::error!("Analysis failed: {}", e);
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
