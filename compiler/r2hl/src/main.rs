//! `r2hl`: highlight radare2 console output.

use r2hl::options::USAGE;
use r2hl::{init_tracing, parse_options, run};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if options.help {
        println!("{USAGE}");
        return;
    }

    if let Err(e) = run(&options) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
