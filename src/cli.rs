use clap::{Parser, Subcommand};
use vgo::platform::{DEFAULT_ARCH, DEFAULT_PLATFORM};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Print debug logs (overridden by `VGO_LOG`)
    #[clap(long, global = true)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: VgoCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum VgoCommand {
    /// Download and install a go version. It is not activated!
    Download {
        /// Version to be downloaded, e.g. 1.21.0 (no leading 'go')
        #[clap(short = 'v', long = "version")]
        version: String,
        /// OS platform: darwin, linux or freebsd
        #[clap(short, long, default_value = DEFAULT_PLATFORM)]
        platform: String,
        /// OS architecture: amd64, arm64, 386, armv6l, ppc64le or s390x
        #[clap(short, long, default_value = DEFAULT_ARCH)]
        arch: String,
    },
    /// List the installed go versions. The active one is highlighted
    List,
    /// Delete an installed go version. The active version can't be deleted
    Delete {
        /// The version number to be deleted
        version: String,
    },
    /// Set the active go version
    Set {
        /// The version number to be activated
        version: String,
    },
    /// Print shell completion candidates for the given words
    #[clap(name = "__complete", hide = true)]
    Complete {
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}
