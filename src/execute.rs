use anyhow::{Context, Result};
use colored::Colorize;
use vgo::complete::candidates;
use vgo::config::Config;
use vgo::fetcher::HttpFetcher;
use vgo::lifecycle::Lifecycle;
use vgo::path_check::check_path;
use vgo::VgoError;
use crate::cli::{VgoCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    let config = Config::load()?;
    let store = config.store();
    if let VgoCommand::Complete { words } = &cli.command {
        for candidate in candidates(&store, words) {
            println!("{candidate}");
        }
        return Ok(());
    }

    let fetcher = HttpFetcher::new(config.download_url())?;
    let mut lifecycle = Lifecycle::new(store, fetcher).binary(config.binary());
    match cli.command {
        VgoCommand::Download { version, platform, arch } => {
            execute_download(&mut lifecycle, &version, &platform, &arch)
        }
        VgoCommand::List => {
            execute_list(&lifecycle)
        }
        VgoCommand::Delete { version } => {
            execute_delete(&mut lifecycle, &version)
        }
        VgoCommand::Set { version } => {
            execute_set(&mut lifecycle, &version)
        }
        VgoCommand::Complete { .. } => Ok(()),
    }
}

pub fn execute_download(
    lifecycle: &mut Lifecycle<HttpFetcher>,
    version: &str,
    platform: &str,
    arch: &str,
) -> Result<()> {
    let path = lifecycle
        .download(version, platform, arch)
        .context("download failed")?;
    println!("Installed go {} at {}", version, path.display());
    Ok(())
}

pub fn execute_list(lifecycle: &Lifecycle<HttpFetcher>) -> Result<()> {
    let listing = lifecycle.listing().context("failed to list versions")?;
    let versions: Vec<String> = listing
        .versions
        .iter()
        .map(|version| match &listing.active {
            Some(active) if active == version => version.bold().to_string(),
            _ => version.clone(),
        })
        .collect();
    println!();
    println!("Versions: {}", versions.join(", "));
    println!();
    if listing.dangling {
        println!(
            "{} active link {} points to a missing directory. Run `vgo set <version>` to fix it.",
            "[WARN]".yellow(),
            lifecycle.store().active_link.display()
        );
    }
    Ok(())
}

pub fn execute_delete(lifecycle: &mut Lifecycle<HttpFetcher>, version: &str) -> Result<()> {
    match lifecycle.delete(version) {
        Ok(()) => {
            println!("Deleted go {version}");
            Ok(())
        }
        Err(e @ VgoError::ActiveVersionDeletion { .. }) => {
            println!(
                "\n{} you are trying to delete the active version of go. Change the active version before deleting\n",
                "[ERROR]".red()
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn execute_set(lifecycle: &mut Lifecycle<HttpFetcher>, version: &str) -> Result<()> {
    if let Some(notice) = check_path(&lifecycle.store().active_bin_dir()) {
        println!("{notice}");
    }
    let activated = lifecycle.activate(version)?;
    println!("{}", activated.report);
    Ok(())
}
