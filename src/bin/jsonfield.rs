fn main() {
    if let Err(e) = jsonfield::cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
