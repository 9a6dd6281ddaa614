use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::PortalSettings;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";
const LOG_FILE_LIMIT: u64 = 1024 * 1024;
const LOG_ARCHIVES: u32 = 3;

/// Sets up file logging. The terminal belongs to the UI, so nothing is ever
/// logged to stdout or stderr.
///
/// A `config/log4rs.yaml` under `root` takes precedence over the built-in
/// rolling file setup.
pub fn init(root: &Path, settings: &PortalSettings) -> Result<()> {
    let yaml = root.join("config/log4rs.yaml");
    if yaml.exists() {
        return log4rs::init_file(&yaml, Default::default())
            .with_context(|| format!("Failed to load logging config: {}", yaml.display()));
    }

    let log_file = settings.log_file.clone().unwrap_or_else(default_log_path);
    let config = rolling_config(&log_file, settings.log_level_filter())?;
    log4rs::init_config(config).context("Failed to install logger")?;
    Ok(())
}

fn rolling_config(log_file: &Path, level: LevelFilter) -> Result<Config> {
    let archive = log_file.with_extension("{}.log.gz");
    let roller = FixedWindowRoller::builder()
        .build(&archive.to_string_lossy(), LOG_ARCHIVES)
        .context("Failed to build log roller")?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(LOG_FILE_LIMIT)),
        Box::new(roller),
    );
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file, Box::new(policy))
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .context("Invalid logging config")
}

/// `$XDG_STATE_HOME/policy-portal/portal.log`, then `~/.local/state/...`,
/// then the working directory.
fn default_log_path() -> PathBuf {
    let base = env::var_os("XDG_STATE_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|value| !value.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("policy-portal").join("portal.log")
}
