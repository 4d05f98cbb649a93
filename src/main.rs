//! hrtrack main entrypoint.

use hrtrack::run;
use hrtrack::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
