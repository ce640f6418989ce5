fn main() {
    if let Err(err) = csv_keeper::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
