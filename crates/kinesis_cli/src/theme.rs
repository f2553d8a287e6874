//! `kinesis theme`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use kinesis_app::StorageBackend;
use kinesis_theme::{detect_system_color_scheme, ThemePreference, ThemeSource, ThemeStore};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: ThemeAction,

    /// Preferences file, overriding the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Site config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the current preference and where it came from
    Show,
    /// Flip between light and dark
    Toggle,
    /// Set an explicit preference
    Set {
        /// `light` or `dark`
        preference: ThemePreference,
    },
}

fn source_label(source: ThemeSource) -> &'static str {
    match source {
        ThemeSource::Persisted => "saved preference",
        ThemeSource::System => "system color scheme",
        ThemeSource::Default => "default",
    }
}

pub fn run(args: ThemeArgs) -> Result<()> {
    let mut config = crate::load_config(args.config.as_deref())?;
    if let Some(path) = args.store {
        config.theme.storage = StorageBackend::File;
        config.theme.path = Some(path);
    }

    // Unlike the page, the CLI reports storage problems instead of
    // falling back to memory
    let storage = config
        .theme
        .open_storage()
        .context("Failed to open preference storage")?;
    let mut store = ThemeStore::init(storage, config.theme.key.clone(), detect_system_color_scheme());

    match args.action {
        ThemeAction::Show => {
            println!("{} ({})", store.get(), source_label(store.source()));
        }
        ThemeAction::Toggle => {
            let from = store.get();
            let to = store.toggle();
            tracing::info!(%from, %to, "theme toggled");
            println!("{to}");
        }
        ThemeAction::Set { preference } => {
            if store.set(preference) {
                tracing::info!(%preference, "theme set");
            } else {
                tracing::info!(%preference, "theme unchanged");
            }
            println!("{preference}");
        }
    }
    Ok(())
}
