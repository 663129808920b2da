use std::path::Path;

/// Returns setup instructions when `bin_dir` is not one of the entries of
/// `path_var` (a `PATH`-style list). Nothing is modified.
pub fn setup_notice(path_var: &str, bin_dir: &Path) -> Option<String> {
    if std::env::split_paths(path_var).any(|entry| entry == bin_dir) {
        return None;
    }
    Some(format!(
        "[WARN] go path is not set in PATH. Add the following to your shell profile (e.g. ~/.zshrc):\n\
         \texport GO_BIN=\"{}\"\n\
         \texport PATH=\"${{PATH}}:${{GO_BIN}}\"",
        bin_dir.display()
    ))
}

/// [`setup_notice`] against the current process environment.
pub fn check_path(bin_dir: &Path) -> Option<String> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    setup_notice(&path_var.to_string_lossy(), bin_dir)
}
