fn main() {
    if let Err(err) = note_dates::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
