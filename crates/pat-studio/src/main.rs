fn main() {
    if let Err(e) = pat_studio::run() {
        eprintln!("studio error: {}", e);
        std::process::exit(1);
    }
}
