use std::process::exit;

use colored::Colorize;

fn main() {
    if let Err(e) = fleetview::app::run_cli() {
        eprintln!(
            "{}{}{} {}",
            "[".bold().white(),
            "ERR".bold().red(),
            "]".bold().white(),
            e.as_str().bold().white()
        );
        exit(1);
    }
}
