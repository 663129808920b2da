use crate::platform::{Arch, Platform};
use crate::registry::list_versions;
use crate::store::Store;

pub const SUBCOMMANDS: [&str; 4] = ["download", "list", "delete", "set"];

/// Completion candidates for the words typed after the binary name.
///
/// The last word is the one being completed (possibly empty). Installed
/// versions come from the registry; an unreadable install root simply yields
/// no version candidates.
pub fn candidates(store: &Store, words: &[String]) -> Vec<String> {
    let (current, before) = match words.split_last() {
        Some((last, rest)) => (last.as_str(), rest),
        None => ("", &[][..]),
    };

    let options: Vec<String> = match before {
        [] => SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
        [cmd] if cmd == "set" || cmd == "delete" => list_versions(store).unwrap_or_default(),
        [cmd, .., flag] if cmd == "download" => match flag.as_str() {
            "--platform" | "-p" => Platform::names().into_iter().map(String::from).collect(),
            "--arch" | "-a" => Arch::names().into_iter().map(String::from).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    options
        .into_iter()
        .filter(|option| option.starts_with(current))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn words(input: &[&str]) -> Vec<String> {
        input.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_subcommands_filtered_by_prefix() {
        let store = Store::new("/nonexistent", "/tmp");
        assert_eq!(candidates(&store, &words(&["d"])), vec!["download", "delete"]);
        assert_eq!(candidates(&store, &[]).len(), 4);
    }

    #[test]
    fn test_versions_for_set() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf(), dir.path().to_path_buf());
        std::fs::create_dir(store.version_dir("1.21.0")).unwrap();

        assert_eq!(candidates(&store, &words(&["set", ""])), vec!["1.21.0"]);
        assert!(candidates(&store, &words(&["set", "1.22"])).is_empty());
    }

    #[test]
    fn test_unreadable_root_yields_nothing() {
        let store = Store::new("/nonexistent", "/tmp");
        assert!(candidates(&store, &words(&["delete", ""])).is_empty());
    }

    #[test]
    fn test_download_flag_values() {
        let store = Store::new("/nonexistent", "/tmp");
        assert_eq!(
            candidates(&store, &words(&["download", "--platform", "l"])),
            vec!["linux"]
        );
        assert_eq!(
            candidates(&store, &words(&["download", "--version", "1.21.0", "--arch", "a"])),
            vec!["amd64", "arm64", "armv6l"]
        );
    }
}
