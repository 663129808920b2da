//! # vgo Core Library
//!
//! This crate contains the core logic of the `vgo` tool – a manager for side-by-side Go toolchain
//! installations with one system-wide active version, selected through a symlink.
//!
//! A version moves between three states: absent, installed (a `<prefix><version>` directory in
//! the install root) and active (the target of the active link). The filesystem is the only
//! state; every operation re-reads it.
//!
//! This library is built for the `vgo` CLI, but you can also reuse it as a backend in other tools.
//!
//! ## Modules Overview
//! - [`lifecycle`] – The four operations (download, list, activate, delete) and their guards
//! - [`fetcher`] – Retrieving toolchain archives over HTTP
//! - [`installer`] – Extracting archives and moving them into the install root atomically
//! - [`registry`] – Enumerating installed versions
//! - [`activation`] – Reading and rewriting the active link
//! - [`store`] – Where the install root, active link and scratch directory live
//! - [`config`] – `vgo.toml` configuration
//! - [`platform`] – Supported platforms and architectures
//! - [`path_check`] – `PATH` setup hint for the active toolchain
//! - [`complete`] – Shell completion candidates
//! - [`error`] – The error taxonomy


pub mod error;
pub mod platform;
pub mod store;
pub mod config;
pub mod fetcher;
pub mod installer;
pub mod registry;
pub mod activation;
pub mod lifecycle;
pub mod path_check;
pub mod complete;

pub use error::{Result, VgoError};
pub use store::Store;
pub use config::Config;
pub use fetcher::{Fetcher, HttpFetcher};
pub use installer::{Installer, RandomNamer, StagingNamer};
pub use lifecycle::{Activated, Lifecycle, Listing};
pub use platform::{Arch, Platform, Target};
