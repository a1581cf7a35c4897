use {std::io::Write, testgen::layout::report};

/// Prints the sizes of the native records and the field layout of `aiMesh`.
fn main() {
    pretty_env_logger::init();

    if let Err(err) = std::io::stdout().lock().write_all(report().as_bytes()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
