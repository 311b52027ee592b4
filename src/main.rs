use std::process::exit;

fn main() {
    if let Err(err) = framelift::run() {
        eprintln!("Error: {}", err);
        exit(1);
    }
}
