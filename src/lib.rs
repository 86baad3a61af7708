mod git;
mod shell;
pub mod term;

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{anyhow, Result};
use clap::Args;
use walkdir::WalkDir;

pub const CLI_NAME: &str = env!("CARGO_PKG_NAME");
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const BARE_TEMPLATE_REPO: &str = "https://github.com/Tyler-Churchill/gqli-bare-project.git";
const STARTER_TEMPLATE_REPO: &str = "https://github.com/Tyler-Churchill/gqli-starter-project.git";

pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";
pub const DEFAULT_START_COMMAND: &str = "npm start";

#[derive(Args, Debug, Clone)]
pub struct CreateOpts {
    /// Name of the project to create
    pub project_name: String,
    /// Where to create it (defaults to ./<project_name>)
    pub project_path: Option<PathBuf>,
    /// Which setup mode to use. 'blank' for bare bones project
    #[arg(short = 's', long = "setup_mode", value_name = "mode")]
    pub setup_mode: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ModelOpts {
    /// Blank for both server/client, s for just server, c for just client
    #[arg(short = 'm', long, value_name = "mode")]
    pub mode: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunOpts {
    /// Blank for both server/client, s for just server, c for just client
    #[arg(short = 'm', long, value_name = "mode")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    Bare,
    Starter,
}

impl SetupMode {
    /// Anything other than an explicit `blank` falls back to the starter
    /// template, including an absent flag.
    fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("blank") => SetupMode::Bare,
            _ => SetupMode::Starter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectDescription {
    name: String,
    target_dir: PathBuf,
    mode: SetupMode,
}

impl ProjectDescription {
    pub fn new(opts: &CreateOpts) -> Self {
        let target_dir = opts
            .project_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./{}", opts.project_name)));

        ProjectDescription {
            name: opts.project_name.clone(),
            target_dir,
            mode: SetupMode::from_flag(opts.setup_mode.as_deref()),
        }
    }

    fn template_repo(&self) -> &'static str {
        match self.mode {
            SetupMode::Bare => BARE_TEMPLATE_REPO,
            SetupMode::Starter => STARTER_TEMPLATE_REPO,
        }
    }

    /// Downloads the selected template and materializes it under the target
    /// directory.
    pub fn create(&self) -> Result<()> {
        term::banner(&format!("{CLI_NAME} -v {CLI_VERSION}"));
        term::log("Creating project...");
        match self.mode {
            SetupMode::Bare => term::log("Downloading bare project..."),
            SetupMode::Starter => term::log("Downloading starter project..."),
        }

        let checkout = git::fetch_template(self.template_repo())?;
        self.unpack(&checkout)?;

        term::rainbow(&format!("Project: {} created!\n", self.name));
        term::warn(&format!(
            "cd into {} and type '{} run' to start the project locally\n",
            self.target_dir.display(),
            CLI_NAME
        ));
        Ok(())
    }

    /// Copies the checkout into the target directory. The template's git
    /// metadata stays behind so the new project starts without history.
    fn unpack(&self, checkout: &Path) -> Result<()> {
        fs::create_dir_all(&self.target_dir)?;

        let entries = WalkDir::new(checkout).into_iter().filter_entry(|entry| {
            !entry
                .path()
                .components()
                .any(|c| c == Component::Normal(".git".as_ref()))
        });

        for entry in entries {
            let entry = entry.map_err(|e| anyhow!("cannot read entry : {}", e))?;
            let entry_path = entry.path().strip_prefix(checkout)?;
            if entry_path == Path::new("") {
                continue;
            }

            let destination = self.target_dir.join(entry_path);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)
                    .map_err(|e| anyhow!("cannot create dir : {}", e))?;
            } else {
                fs::copy(entry.path(), &destination)
                    .map_err(|e| anyhow!("cannot copy file : {}", e))?;
            }
        }

        Ok(())
    }
}

impl ModelOpts {
    /// Model generation is not wired up yet; the flag is accepted so the
    /// command shape stays stable.
    /// TODO: emit server/client model stubs once the starter template ships
    /// its model layout.
    pub fn run(&self) -> Result<()> {
        let _mode = self.mode.as_deref().unwrap_or("both");
        Ok(())
    }
}

/// Install-then-start pipeline for the project in the current directory.
///
/// The command lines are plain fields so callers can substitute the package
/// manager invocations.
#[derive(Debug, Clone)]
pub struct ProjectRunner {
    pub install_command: String,
    pub start_command: String,
}

impl Default for ProjectRunner {
    fn default() -> Self {
        ProjectRunner {
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            start_command: DEFAULT_START_COMMAND.to_string(),
        }
    }
}

impl ProjectRunner {
    pub fn new(opts: &RunOpts) -> Self {
        // The mode flag is accepted for compatibility but nothing branches
        // on it yet.
        let _mode = opts.mode.as_deref().unwrap_or("both");
        ProjectRunner::default()
    }

    /// Installs dependencies, then starts the dev server. The start step
    /// only runs once the install step has succeeded.
    pub fn run(&self) -> Result<()> {
        term::log("Installing project dependencies... (this can take a few moments)");
        self.step(&self.install_command)?;
        self.step(&self.start_command)?;
        println!("done");
        Ok(())
    }

    fn step(&self, command: &str) -> Result<()> {
        let output = shell::exec(command)?;
        term::log(&String::from_utf8_lossy(&output.stdout));
        term::error(&String::from_utf8_lossy(&output.stderr));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_opts(name: &str, path: Option<&str>, mode: Option<&str>) -> CreateOpts {
        CreateOpts {
            project_name: name.to_string(),
            project_path: path.map(PathBuf::from),
            setup_mode: mode.map(String::from),
        }
    }

    #[test]
    fn blank_mode_selects_the_bare_template() {
        let desc = ProjectDescription::new(&create_opts("myapp", None, Some("blank")));
        assert_eq!(desc.mode, SetupMode::Bare);
        assert_eq!(desc.template_repo(), BARE_TEMPLATE_REPO);
    }

    #[test]
    fn any_other_mode_selects_the_starter_template() {
        for flag in [None, Some("starter"), Some("full"), Some("")] {
            let desc = ProjectDescription::new(&create_opts("myapp", None, flag));
            assert_eq!(desc.mode, SetupMode::Starter);
            assert_eq!(desc.template_repo(), STARTER_TEMPLATE_REPO);
        }
    }

    #[test]
    fn target_dir_defaults_to_the_project_name() {
        let desc = ProjectDescription::new(&create_opts("myapp", None, None));
        assert_eq!(desc.target_dir, PathBuf::from("./myapp"));
    }

    #[test]
    fn target_dir_is_used_verbatim() {
        let desc = ProjectDescription::new(&create_opts("myapp", Some("./custom"), None));
        assert_eq!(desc.target_dir, PathBuf::from("./custom"));
    }

    #[test]
    fn unpack_skips_git_metadata() {
        let checkout = tempfile::tempdir().unwrap();
        fs::write(checkout.path().join("server.js"), "module.exports = {};").unwrap();
        fs::create_dir_all(checkout.path().join("src/models")).unwrap();
        fs::write(checkout.path().join("src/models/user.js"), "").unwrap();
        fs::create_dir_all(checkout.path().join(".git/objects")).unwrap();
        fs::write(checkout.path().join(".git/HEAD"), "ref: refs/heads/master").unwrap();

        let target = tempfile::tempdir().unwrap();
        let desc = ProjectDescription {
            name: "myapp".to_string(),
            target_dir: target.path().join("myapp"),
            mode: SetupMode::Starter,
        };
        desc.unpack(checkout.path()).unwrap();

        assert!(target.path().join("myapp/server.js").exists());
        assert!(target.path().join("myapp/src/models/user.js").exists());
        assert!(!target.path().join("myapp/.git").exists());
    }

    #[test]
    fn runner_defaults_to_npm() {
        let runner = ProjectRunner::new(&RunOpts {
            mode: Some("c".to_string()),
        });
        assert_eq!(runner.install_command, DEFAULT_INSTALL_COMMAND);
        assert_eq!(runner.start_command, DEFAULT_START_COMMAND);
    }

    #[cfg(unix)]
    #[test]
    fn failed_install_skips_the_start_step() {
        let scratch = tempfile::tempdir().unwrap();
        let marker = scratch.path().join("started");
        let runner = ProjectRunner {
            install_command: "false".to_string(),
            start_command: format!("touch {}", marker.display()),
        };
        assert!(runner.run().is_err());
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_executes_install_then_start() {
        let scratch = tempfile::tempdir().unwrap();
        let installed = scratch.path().join("installed");
        let started = scratch.path().join("started");
        let runner = ProjectRunner {
            install_command: format!("touch {}", installed.display()),
            start_command: format!("touch {}", started.display()),
        };
        runner.run().unwrap();
        assert!(installed.exists());
        assert!(started.exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_start_is_an_error() {
        let scratch = tempfile::tempdir().unwrap();
        let installed = scratch.path().join("installed");
        let runner = ProjectRunner {
            install_command: format!("touch {}", installed.display()),
            start_command: "false".to_string(),
        };
        assert!(runner.run().is_err());
        assert!(installed.exists());
    }

    #[test]
    fn create_model_is_a_silent_stub() {
        ModelOpts { mode: None }.run().unwrap();
        ModelOpts {
            mode: Some("s".to_string()),
        }
        .run()
        .unwrap();
    }
}
