pub mod cli;
pub mod config;
pub mod render;
pub mod session;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use anyhow::Context;
use clap::Parser;
use counsel_core::{Directory, RecordStore, seed};
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args)?;
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting counsel CLI");
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.config.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    );

    let profiles = match config::resolve_seed_path(&cfg, cli.seed.as_deref()) {
        Some(path) => seed::load_seed_file(&path)?,
        None => seed::embedded().context("bundled seed profiles are invalid")?,
    };
    let store = RecordStore::from_seed(profiles).context("invalid seed profiles")?;
    let directory = Directory::new(store, config::fee_format(&cfg)?);

    let renderer = render::Renderer::new(&cfg, io::stdout().is_terminal())?;
    let confirm_delete = !cli.yes && cfg.get_bool("confirm.delete").unwrap_or(true);
    let mut session = session::Session::new(directory, renderer, confirm_delete);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut out)?;
        }
    }

    info!("done");
    Ok(())
}
