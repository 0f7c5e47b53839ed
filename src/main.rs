use argtree::cli::{self, CliError, Command, RunOptions, RunResult};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "argtree")]
#[command(about = "argtree - parse, query and rewrite brace-grouped shorthand tokens")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Parse options as JSON, e.g. '{"delimiters": ["#", "."]}'
    #[arg(long, global = true)]
    options: Option<String>,

    /// Log parser and transform activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of the text
    Fmt {
        /// Text to parse (reads from stdin if not provided)
        text: Option<String>,
    },

    /// Print the tree structure as JSON
    Tree {
        /// Text to parse (reads from stdin if not provided)
        text: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print every token containing the selector
    Select {
        /// Token to look for, e.g. 'a.x'
        selector: String,

        /// Text to parse (reads from stdin if not provided)
        text: Option<String>,
    },

    /// Show the notation reference
    Docs,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let (command, text) = match cli.command {
        Commands::Fmt { text } => (Command::Format, text),
        Commands::Tree { text, pretty } => (Command::Tree { pretty }, text),
        Commands::Select { selector, text } => (Command::Select { selector }, text),
        Commands::Docs => {
            print!("{}", cli::get_notation_reference());
            return;
        }
    };

    if let Err(e) = run(command, text, cli.options) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, text: Option<String>, options: Option<String>) -> Result<(), CliError> {
    let input = match text {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let run = RunOptions {
        command,
        input,
        options,
    };

    match cli::execute(&run)? {
        RunResult::Text(text) => println!("{}", text),
        RunResult::Json { value, pretty } => {
            let json = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
