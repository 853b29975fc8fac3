fn main() {
    if let Err(err) = dgii_sql::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
