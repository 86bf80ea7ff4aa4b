use clap::{Parser as ClapParser, Subcommand};
use paradox_script::cli::{self, CheckOptions, CliError};
use paradox_script::{output, ParseOptions};
use std::fs;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "pdx")]
#[command(about = "pdx - Inspect Paradox-style script files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Script file (reads from stdin if not provided)
    file: Option<String>,

    /// Do not substitute @constants
    #[arg(long)]
    no_constants: bool,

    /// Code page for files that are not UTF-8
    #[arg(short, long)]
    encoding: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report errors or element counts
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the parsed tree as JSON
    Dump {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the values found at a dotted key path
    Get {
        /// Key path, e.g. state.history.owner
        path: String,

        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { input } => run_check(input),
        Commands::Dump { input, pretty } => run_dump(input, pretty),
        Commands::Get { path, input } => run_get(input, &path),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn check_options(args: InputArgs) -> Result<CheckOptions, CliError> {
    let (file_path, input) = match args.file {
        Some(path) => {
            let bytes = fs::read(&path)?;
            (path, Some(bytes))
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            ("<stdin>".to_string(), Some(buffer))
        }
        None => (String::new(), None),
    };

    Ok(CheckOptions {
        file_path,
        input,
        parse: ParseOptions {
            resolve_constants: !args.no_constants,
            encoding: args.encoding,
        },
    })
}

fn run_check(args: InputArgs) -> Result<(), CliError> {
    let options = check_options(args)?;
    let summary = cli::execute_check(&options)?;
    println!("{}: {}", options.file_path, summary);
    Ok(())
}

fn run_dump(args: InputArgs, pretty: bool) -> Result<(), CliError> {
    let root = cli::load_document(&check_options(args)?)?;
    let json = if pretty {
        output::to_json_pretty(&root)
    } else {
        output::to_json(&root)
    };
    println!("{}", json);
    Ok(())
}

fn run_get(args: InputArgs, path: &str) -> Result<(), CliError> {
    let root = cli::load_document(&check_options(args)?)?;
    for line in cli::execute_get(&root, path)? {
        println!("{}", line);
    }
    Ok(())
}
