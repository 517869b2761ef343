//! Arguments shared by several subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use extraction::layout::Layout;

use crate::distpaths;

/// Name of the layout file looked up in the XDG configuration directories.
const LAYOUT_FILE: &str = "layout.yaml";

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// YAML file overriding the statement layout constants.
    ///
    /// Defaults to layout.yaml in the bank-archive XDG configuration directory, if present.
    #[arg(long)]
    layout: Option<PathBuf>,
}

impl LayoutArgs {
    pub fn load(&self, xdg_dirs: &xdg::BaseDirectories) -> Result<Layout> {
        let path = match &self.layout {
            Some(path) => Some(path.clone()),
            None => xdg_dirs.find_config_file(LAYOUT_FILE),
        };
        match path {
            Some(path) => {
                log::info!("Loading layout from {:?}.", path);
                Layout::load(&path)
            }
            None => Ok(Layout::default()),
        }
    }
}

#[derive(Args, Debug)]
pub struct TabulaArgs {
    /// Path to Tabula JAR file.
    ///
    /// Defaults to tabula.jar next to the executable, if present.
    #[arg(long)]
    tabula_libpath: Option<String>,
}

impl TabulaArgs {
    pub fn libpath(&self) -> Result<String> {
        self.tabula_libpath
            .clone()
            .or_else(distpaths::tabula_jar)
            .ok_or_else(|| anyhow!("no Tabula JAR found, pass --tabula-libpath"))
            .context("locating Tabula")
    }
}
