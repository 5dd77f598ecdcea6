use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;

use buildgate::commands::run::OutputFormat;
use buildgate::commands::{list, run};

#[derive(Parser)]
#[command(name = "buildgate")]
#[command(about = "Pre-build CI verification gate", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks against a project root
    Run {
        /// Project root to validate
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Expected Python package name
        #[arg(short, long, default_value = "mlc_llm")]
        package: String,

        /// Report output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print only the summary line
        #[arg(short, long)]
        quiet: bool,
    },

    /// List registered checks without touching any artifact
    List {
        /// Expected Python package name
        #[arg(short, long, default_value = "mlc_llm")]
        package: String,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BUILDGATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            root,
            package,
            format,
            quiet,
        } => run::execute(root, &package, format, quiet),
        Commands::List { package } => list::execute(&package).map(|()| true),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(true)
        }
    };

    // Exit 0 only when the gate (or command) succeeded; 1 when at least one
    // check failed; 2 when the invocation itself was invalid.
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
