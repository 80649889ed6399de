mod cli;
mod error;
mod export;
mod fmt;
mod logging;
mod models;
mod month;
#[cfg(feature = "ocr")]
mod ocr;
mod receipt;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ExportCommands};

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Load { path } => cli::load::run(&path),
        Commands::Add {
            amount,
            merchant,
            category,
            note,
            date,
            image,
            month,
        } => cli::add::run(cli::add::NewExpense {
            amount,
            merchant,
            category,
            note,
            date,
            image,
            month,
        }),
        Commands::List { month } => cli::list::run(month.as_deref()),
        Commands::Delete { reference, month } => cli::delete::run(&reference, month.as_deref()),
        Commands::ReplaceImage {
            reference,
            image,
            month,
        } => cli::receipt::replace(&reference, &image, month.as_deref()),
        Commands::Clear { month, yes } => cli::clear::run(month.as_deref(), yes),
        Commands::Export { command } => match command {
            ExportCommands::Csv { month, output } => cli::export::csv(month.as_deref(), output),
            ExportCommands::Zip { month, output } => cli::export::zip(month.as_deref(), output),
        },
        Commands::Month { command } => cli::month::run(command),
        Commands::Categories => cli::categories::run(),
        Commands::Status => cli::status::run(),
        #[cfg(feature = "ocr")]
        Commands::Ocr { image, key } => cli::ocr::run(&image, key),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
