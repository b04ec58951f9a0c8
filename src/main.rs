fn main() {
    if let Err(e) = overseer_reports::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
