use std::process::ExitCode;
use clap::Parser;

use ppttc_pipeline::commands;
use ppttc_pipeline::config::{ConvertArgs, GenerateArgs, InputArgs};
use ppttc_pipeline::errors::PipelineError;

#[derive(clap::Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Convert the CSV into a .ppttc document
    Convert(ConvertArgs),
    /// Convert the CSV and render the presentation with think-cell
    Generate(GenerateArgs),
    /// Print the chart table without writing any files
    Preview(InputArgs),
}


fn setup_logging() -> anyhow::Result<flexi_logger::LoggerHandle> {
    let spec = flexi_logger::LogSpecification::parse("warn,ppttc_pipeline=debug")?;
    let handle = flexi_logger::Logger::with(spec)
        .log_to_file(
            flexi_logger::FileSpec::default()
                .directory("logs")
                .basename("ppttc-pipeline")
                .use_timestamp(false),
        )
        .duplicate_to_stdout(flexi_logger::Duplicate::Info)
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stdout(flexi_logger::colored_detailed_format)
        .set_palette("b1;3;2;4;6".to_string())
        .start()?;
    Ok(handle)
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Command::Convert(convert) => {
            commands::convert::convert(&convert)?;
        }
        Command::Generate(generate) => {
            commands::generate::generate(&generate)?;
        }
        Command::Preview(preview) => {
            commands::preview::preview(&preview)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logger = match setup_logging() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to set up logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Starting ppttc pipeline!");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
