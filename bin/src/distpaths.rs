use std::path::PathBuf;

/// Returns a possible path to the Tabula JAR file (as a [String] for CLI parsing), assuming that
/// the process is running as part of a distribution, with the JAR next to the executable.
pub fn tabula_jar() -> Option<String> {
    sibling_file("tabula.jar").and_then(|p| p.to_str().map(str::to_owned))
}

fn sibling_file(file_name: &str) -> Option<PathBuf> {
    let mut path = std::env::current_exe().ok()?;
    path.set_file_name(file_name);
    path.is_file().then_some(path)
}
