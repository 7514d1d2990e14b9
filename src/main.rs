use clap::Parser;

use todolist::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli).await {
        log::error!("{e:#}");
        eprintln!("{}", cli::describe_error(&e));
        std::process::exit(1);
    }
}
