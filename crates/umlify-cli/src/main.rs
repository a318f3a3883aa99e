//! Umlify CLI - Turn Java-style class source into UMLet diagrams

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::UmlifyApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
