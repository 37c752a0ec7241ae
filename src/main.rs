use clap::Parser;
use finops::action::ActionDispatcher;
use finops::cli::{
    accounts, chat, costs, handle_completions, handle_config_init, invoke, load_config, report,
    serve, Cli, Commands, ConfigCommands, SourceArgs,
};
use finops::config::FinopsConfig;
use finops::logging::init_tracing;
use finops::sources::DataSources;

/// Load config, start logging and pick data sources for a one-shot command.
async fn prepare(
    args: &SourceArgs,
) -> Result<(FinopsConfig, DataSources), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    init_tracing(&config.logging)?;
    let sources = DataSources::from_config(&config).await;
    Ok((config, sources))
}

fn print_output(output: String) {
    if !output.is_empty() {
        println!("{}", output);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Accounts(args) => match prepare(&args.source).await {
            Ok((_, sources)) => accounts::handle_accounts(&args, &sources).await.map(print_output),
            Err(e) => Err(e),
        },
        Commands::Costs(args) => match prepare(&args.source).await {
            Ok((_, sources)) => costs::handle_costs(&args, &sources).await.map(print_output),
            Err(e) => Err(e),
        },
        Commands::Report(args) => match prepare(&args.source).await {
            Ok((_, sources)) => report::handle_report(&args, &sources).await.map(print_output),
            Err(e) => Err(e),
        },
        Commands::Invoke(args) => match prepare(&args.source).await {
            Ok((config, sources)) => {
                let dispatcher = ActionDispatcher::new(sources)
                    .with_event_logging(config.logging.log_events);
                invoke::handle_invoke(&args, &dispatcher).await.map(print_output)
            }
            Err(e) => Err(e),
        },
        Commands::Serve(args) => serve::run_serve(args).await,
        Commands::Chat(args) => chat::run_chat(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args).map(print_output),
        },
        Commands::Completions(args) => {
            handle_completions(&args, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
