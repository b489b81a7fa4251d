use clap::Parser;
use dmg_read_more::cli::{Cli, Command, GlobalArgs, SearchArgs};
use dmg_read_more::config::{self, Config, FileConfig};
use dmg_read_more::error::ScanError;
use dmg_read_more::logging;
use dmg_read_more::report::StdoutSink;
use dmg_read_more::scan::Scanner;
use dmg_read_more::store::sqlite::SqliteStore;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn search(global: &GlobalArgs, args: &SearchArgs) -> Result<(), ScanError> {
    // dates first: a malformed date wins over any config or database problem
    let today = chrono::Local::now().date_naive();
    let request = config::search_request(args, today)?;

    let file = FileConfig::load(global.config.as_deref()).unwrap_or_else(|e| fail(e));
    let config = Config::from_global_args(global, file).unwrap_or_else(|e| fail(e));

    let store = SqliteStore::open(&config.database, &config.table_prefix)?;

    Scanner::new(store).run(&request, &mut StdoutSink::new())?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match &cli.command {
        Command::Search(args) => match search(&cli.global, args) {
            Ok(()) | Err(ScanError::OutputClosed) => {}
            Err(e) => fail(e),
        },
    }
}
