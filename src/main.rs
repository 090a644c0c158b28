use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use gpulab_portal::errors::ErrorHandler;
use gpulab_portal::structs::cli::Cli;
use gpulab_portal::workers::command_runner::CommandRunner;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let mut runner = CommandRunner::new();
    if let Err(e) = runtime.block_on(runner.run_command(cli.command)) {
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }
    Ok(())
}
