//! toponym CLI - context windows and canonical names for place mentions
//!
//! # Examples
//!
//! ```bash
//! # Window and canonicalize recognizer output for a book
//! toponym process book.txt --mentions mentions.json
//!
//! # Only the labels to geocode, as JSON
//! toponym --format json process book.txt -m mentions.json --targets-only
//!
//! # Cluster a list of names
//! toponym canonicalize Cachimayo Cachimayu cachimayo Lima
//!
//! # Show configuration
//! toponym show-config
//! ```

use clap::Parser;
use toponym::cli::output::print_error;
use toponym::cli::{init_logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
