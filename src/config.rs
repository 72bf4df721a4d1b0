use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::util::parse_flag;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for [`crate::Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory downloaded files are written to.
    pub dir: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to verify TLS certificates.
    pub verify: bool,
    /// Whether to draw a progress bar on stderr.
    pub progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            timeout: DEFAULT_TIMEOUT,
            verify: true,
            progress: true,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    dir: Option<PathBuf>,
    verify: Option<bool>,
    timeout: Option<Duration>,
}

pub(crate) fn load_config(dir: Option<PathBuf>, verify: Option<bool>) -> Result<FetchConfig> {
    let env = |key: &str| std::env::var(key).ok();
    resolve_config(dir, verify, env, &rc_candidates(env))
}

/// Applies arguments, then `env`, then the first existing rc file, then defaults.
fn resolve_config<E>(
    dir: Option<PathBuf>,
    verify: Option<bool>,
    env: E,
    rc_candidates: &[PathBuf],
) -> Result<FetchConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let mut dir = dir.or_else(|| env("EVE_DATA_DIR").map(PathBuf::from));
    let mut verify = verify.or_else(|| env("EVE_VERIFY").map(|v| parse_flag(&v)));
    let mut timeout = None;

    for rc_path in rc_candidates {
        if rc_path.exists() {
            let cfg = read_rc(rc_path).with_context(|| {
                format!("failed to read configuration file {}", rc_path.display())
            })?;
            tracing::debug!(path = %rc_path.display(), "loaded rc file");

            dir = dir.or(cfg.dir);
            verify = verify.or(cfg.verify);
            timeout = cfg.timeout;
            break;
        }
    }

    Ok(FetchConfig {
        dir: dir.unwrap_or_else(default_dir),
        timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        verify: verify.unwrap_or(true),
        progress: true,
    })
}

fn default_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(d) => d.join("lasp-eve"),
        None => {
            tracing::warn!("no platform data directory; downloading into ./eve-data");
            PathBuf::from("eve-data")
        }
    }
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    parse_rc(&text)
}

fn parse_rc(text: &str) -> Result<RcConfig> {
    let mut cfg = RcConfig::default();

    // A key may leave its value empty and put it on the following line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            if !line.contains(':') {
                apply(&mut cfg, pk, strip_quotes(line))?;
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if v.is_empty() {
                pending_key = Some(k);
            } else {
                apply(&mut cfg, k, v)?;
            }
        }
    }

    Ok(cfg)
}

fn apply(cfg: &mut RcConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "dir" => cfg.dir = Some(PathBuf::from(value)),
        "verify" => cfg.verify = Some(parse_flag(value)),
        "timeout" => {
            let secs: u64 = match value.parse() {
                Ok(s) => s,
                Err(_) => bail!("timeout must be a whole number of seconds, got {:?}", value),
            };
            cfg.timeout = Some(Duration::from_secs(secs));
        }
        _ => {}
    }
    Ok(())
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates(env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    // 1) EVE_RC (explicit)
    // 2) ./.everc
    // 3) ~/.everc
    if let Some(p) = env("EVE_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".everc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".everc"));
    }
    v
}
