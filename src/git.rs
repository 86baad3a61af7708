use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use auth_git2::GitAuthenticator;
use console::{Emoji, Style};
use indicatif::ProgressBar;

/// Clones `repository` into a temp checkout keyed by the repository location
/// and returns the checkout path. A stale checkout from an earlier run is
/// discarded first.
pub(crate) fn fetch_template(repository: &str) -> Result<PathBuf> {
    let checkout = env::temp_dir().join(format!("{:x}", md5::compute(repository)));
    if checkout.exists() {
        fs::remove_dir_all(&checkout)?;
    }
    fs::create_dir_all(&checkout)?;
    clone(repository, &checkout)?;
    Ok(checkout)
}

fn clone(repository: &str, target_dir: &Path) -> Result<()> {
    let cyan = Style::new().cyan();
    println!("{} {}", Emoji("🔄", ""), cyan.apply_to("Cloning template…"));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(repository.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let auth = GitAuthenticator::default();
    let git_config = git2::Config::open_default()?;
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(auth.credentials(&git_config));

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder.clone(repository, target_dir)?;

    spinner.finish_and_clear();
    Ok(())
}
