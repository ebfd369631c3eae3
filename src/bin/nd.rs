//! Short binary name (`nd`) that forwards to the `note_dates` library.
//! Keeping the alias as a real binary avoids shell alias requirements.

fn main() {
    if let Err(err) = note_dates::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
