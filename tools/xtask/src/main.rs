mod readme;

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.last().map(|e| return e.as_str()) {
        Some("update-readme") => {
            readme::update();
        }
        _ => {
            eprintln!("ERROR: No task selected");
            process::exit(1);
        }
    }
}
