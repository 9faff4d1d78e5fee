fn main() {
    if let Err(e) = redeem_script_parser::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
