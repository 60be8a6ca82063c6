mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, DictAction};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RXSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.name();

    let result = match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::Scan {
            file,
            text,
            simulate,
            save,
        } => cmd::scan::run(
            cmd::scan::Input::from_args(file, text, simulate),
            save,
            cli.date,
            cli.human,
        ),
        Commands::List { status } => cmd::prescription::run_list(status, cli.human),
        Commands::Show { id } => cmd::prescription::run_show(&id, cli.human),
        Commands::Edit {
            id,
            name,
            dosage,
            frequency,
            duration,
            doctor,
            rx_date,
        } => cmd::prescription::run_edit(
            &id,
            rxscan::core::prescriptions::PrescriptionEdit {
                name: name.as_deref(),
                dosage: dosage.as_deref(),
                frequency: frequency.as_deref(),
                duration: duration.as_deref(),
                doctor: doctor.as_deref(),
                date: rx_date.as_deref(),
            },
            cli.human,
        ),
        Commands::Status { id, status } => cmd::prescription::run_status(&id, status, cli.human),
        Commands::Remove { id, yes } => cmd::prescription::run_remove(&id, yes, cli.human),
        Commands::Dict { action } => match action {
            DictAction::List => cmd::dict::run_list(cli.human),
            DictAction::Add { name } => cmd::dict::run_add(&name, cli.human),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
        },
        Commands::Completions { shell } => cmd::completions::run(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        let err = rxscan::output::error(command, "general_error", &e.to_string());
        eprintln!("{}", err);
        process::exit(1);
    }
}
