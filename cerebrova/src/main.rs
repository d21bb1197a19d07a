use cerebrova::commands::command_argument_builder;
use cerebrova::handlers::{
    config_from_matches, handle_descriptions, handle_predict, handle_show, handle_ui,
};
use cerebrova_core::{Config, print_banner};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let config = config_from_matches(Config::from_env(), &chosen_command);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let outcome = match chosen_command.subcommand() {
        // The TUI owns the terminal, so no log output there
        Some(("ui", sub)) => handle_ui(sub, config).await,
        Some(("predict", sub)) => {
            init_tracing();
            handle_predict(sub, &config, quiet).await
        }
        Some(("descriptions", _)) => {
            init_tracing();
            handle_descriptions(&config).await
        }
        Some(("show", sub)) => handle_show(sub, &config),
        // No subcommand provided, just show the banner
        None => Ok(()),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cerebrova=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
