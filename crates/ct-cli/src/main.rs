//! ct - lint and test Helm charts in CI

use clap::{Parser, Subcommand};
use ct_testing::Mode;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;
mod error;
mod exit_codes;
mod options;

use options::{ChartOptions, GitOptions, InstallOptions, LintOptions};

#[derive(Parser)]
#[command(name = "ct")]
#[command(author = "chart-testing Contributors")]
#[command(version)]
#[command(about = "Lint and test Helm charts in CI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ct.yaml in ., ~/.ct or /etc/ct)
    #[arg(long, global = true, env = "CT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true, env = "CT_DEBUG")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint charts: maintainers, version bump, yamllint, schema, helm lint
    Lint {
        #[command(flatten)]
        charts: ChartOptions,

        #[command(flatten)]
        lint: LintOptions,
    },

    /// Install charts, run their tests and clean up
    Install {
        #[command(flatten)]
        charts: ChartOptions,

        #[command(flatten)]
        install: InstallOptions,
    },

    /// Lint charts, then install and test the ones that passed
    LintAndInstall {
        #[command(flatten)]
        charts: ChartOptions,

        #[command(flatten)]
        lint: LintOptions,

        #[command(flatten)]
        install: InstallOptions,
    },

    /// List charts changed against the target branch
    ListChanged {
        #[command(flatten)]
        git: GitOptions,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config_file = cli.config.as_deref();
    let result = match cli.command {
        Commands::Lint { charts, lint } => {
            commands::load_config(config_file, |config| {
                charts.apply(config);
                lint.apply(config);
            })
            .and_then(|config| commands::run::run(config, Mode::Lint))
        }

        Commands::Install { charts, install } => {
            commands::load_config(config_file, |config| {
                charts.apply(config);
                install.apply(config);
            })
            .and_then(|config| commands::run::run(config, Mode::Install))
        }

        Commands::LintAndInstall {
            charts,
            lint,
            install,
        } => commands::load_config(config_file, |config| {
            charts.apply(config);
            lint.apply(config);
            install.apply(config);
        })
        .and_then(|config| commands::run::run(config, Mode::LintAndInstall)),

        Commands::ListChanged { git } => {
            commands::load_config(config_file, |config| git.apply(config))
                .and_then(commands::list_changed::run)
        }
    };

    if let Err(e) = result {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }

    Ok(())
}
