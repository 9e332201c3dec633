//! Stock Insight Bot CLI
//!
//! Answers questions about how a stock has moved and why.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables
//! export ALPHA_VANTAGE_API_KEY="..."
//! export NEWS_API_KEY="..."   # optional, news is skipped without it
//!
//! # Ask one question
//! cargo run --bin stock-bot -- ask "How is Tesla doing today?"
//!
//! # Call a tool directly
//! cargo run --bin stock-bot -- call ticker_price_change '{"ticker":"NVDA","timeframe":"1month"}'
//!
//! # Interactive mode
//! cargo run --bin stock-bot
//! ```

use agent_core::{Agent, Context, ResponseFormat};
use agent_stock::{StockAssistant, StockConfig, StockToolkit};
use agent_tools::ToolRegistry;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "stock-bot")]
#[command(about = "Ask how a stock is doing and why", long_about = None)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one question with a full analysis
    Ask {
        /// Question, e.g. "How is Tesla doing today?"
        question: String,
        /// Lookback window (1day, 1week, 1month)
        #[arg(short, long)]
        timeframe: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available tools and their input schemas
    Tools,
    /// Invoke one tool with JSON parameters
    Call {
        /// Tool name, e.g. ticker_price
        tool: String,
        /// Parameters as a JSON object
        #[arg(default_value = "{}")]
        params: String,
    },
    /// Interactive question loop (default)
    Repl,
}

const HELP: &str = "\
Ask in plain language, e.g. \"How has Nvidia changed in the last 7 days?\"

Commands:
  /tools   list the available tools
  /help    show this help
  /exit    quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    agent_utils::init_tracing_with("warn,agent_stock=info", cli.log_json);

    let config = Arc::new(StockConfig::from_env()?);
    let toolkit = StockToolkit::new(config)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Ask {
            question,
            timeframe,
            json,
        } => {
            let mut context = Context::new();
            if let Some(timeframe) = timeframe {
                context = context.with_timeframe(timeframe);
            }
            if json {
                context = context.with_response_format(ResponseFormat::Json);
            }

            let assistant = StockAssistant::new(toolkit);
            let answer = assistant.process(question, &mut context).await?;
            println!("{answer}");
        }
        Commands::Tools => print_tools(&toolkit.tool_registry())?,
        Commands::Call { tool, params } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;
            let result = toolkit.tool_registry().invoke(&tool, params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Repl => repl(StockAssistant::new(toolkit)).await?,
    }

    Ok(())
}

fn print_tools(registry: &ToolRegistry) -> anyhow::Result<()> {
    for definition in registry.definitions() {
        println!("{}", definition.name);
        println!("  {}", definition.description);
        println!("  {}", serde_json::to_string(&definition.input_schema)?);
        println!();
    }
    Ok(())
}

async fn repl(assistant: StockAssistant) -> anyhow::Result<()> {
    println!("Stock Insight Bot. Type /help for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        match input {
            "" => continue,
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            "/help" => println!("{HELP}\n"),
            "/tools" => print_tools(&assistant.toolkit().tool_registry())?,
            _ => {
                let mut context = Context::new();
                match assistant.process(input.to_string(), &mut context).await {
                    Ok(answer) => println!("{answer}\n"),
                    Err(e) => eprintln!("Error: {e}\n"),
                }
            }
        }
    }

    Ok(())
}
