use anyhow::Result;
use clap::Parser;
use resume_assistant::app_log;
use resume_assistant::cli::{handle_command, Cli};
use resume_assistant::{assistant_from_config, logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    logging::init(&config.log_file)?;

    app_log!(info, "Reference data: {}", config.reference_data_path.display());
    app_log!(info, "Output directory: {}", config.output_dir.display());
    app_log!(info, "OCR engine: {}", config.tesseract_cmd);
    app_log!(info, "Completion endpoint: {}", config.completion_base_url);

    let assistant = assistant_from_config(&config)?;
    handle_command(cli.command, &config, assistant).await
}
