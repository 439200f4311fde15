use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use console::{Term, style};
use sopmod_core::Layout;
use sopmod_core::config::GlobalConfig;
use sopmod_fetch::{HttpClient, ReqwestClient};
use sopmod_install::Installer;

/// Everything a manager command needs, resolved once per invocation.
pub struct Context {
    pub layout:      Layout,
    pub client:      Box<dyn HttpClient>,
    /// Directory the manifest search starts from.
    pub cwd:         PathBuf,
    pub assume_yes:  bool,
    pub progress:    bool,
    /// Executable copied to the shim paths; `None` means the running binary.
    pub shim_source: Option<PathBuf>,
}

impl Context {
    pub fn from_env(assume_yes: bool) -> Result<Self> {
        let layout = Layout::from_env().context("cannot determine the sopmod root")?;
        let client = ReqwestClient::new().context("cannot build the HTTP client")?;
        let cwd = std::env::current_dir().context("cannot read the current directory")?;
        Ok(Self {
            layout,
            client: Box::new(client),
            cwd,
            assume_yes,
            progress: Term::stderr().is_term(),
            shim_source: None,
        })
    }

    pub fn installer(&self) -> Installer<'_, dyn HttpClient> {
        Installer::new(&self.layout, self.client.as_ref()).with_progress(self.progress)
    }

    pub fn load_config(&self) -> Result<GlobalConfig> { Ok(GlobalConfig::load(self.layout.config_path())?) }

    pub fn save_config(&self, config: &GlobalConfig) -> Result<()> {
        Ok(config.save(self.layout.config_path())?)
    }

    /// Ask a yes/no question on the terminal. Empty input means yes.
    pub fn confirm(&self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let mut term = Term::stderr();
        write!(term, "{} {question} [Y/n] ", style("?").cyan().bold())?;
        let answer = term.read_line()?;
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer.is_empty() || answer == "y" || answer == "yes")
    }
}
