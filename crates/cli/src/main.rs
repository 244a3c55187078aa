fn main() {
    if let Err(e) = kinload_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
