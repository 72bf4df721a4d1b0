use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{FetchConfig, load_config};
use crate::error::format_http_error;
use crate::response::QueryResponse;
use crate::util::guess_filename_from_url;

/// A file written by [`Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedFile {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Downloads search results, one file at a time.
///
/// There are no retries: the first failing URL aborts the fetch.
#[derive(Debug, Clone)]
pub struct Fetcher {
    dir: PathBuf,
    progress: bool,
    http: HttpClient,
}

impl Fetcher {
    /// Creates a fetcher using environment variables and/or `.everc`.
    ///
    /// This is equivalent to `Fetcher::new(None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    /// Creates a fetcher using (in order of precedence):
    /// - explicit `dir`/`verify` arguments
    /// - environment variables `EVE_DATA_DIR` / `EVE_VERIFY`
    /// - config file from `EVE_RC` or `.everc`
    pub fn new(dir: Option<PathBuf>, verify: Option<bool>) -> Result<Self> {
        Self::with_config(load_config(dir, verify)?)
    }

    pub fn with_config(cfg: FetchConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("lasp-eve/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("lasp-eve")),
        );

        let mut builder = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(cfg.timeout);

        if !cfg.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            dir: cfg.dir,
            progress: cfg.progress,
            http,
        })
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads every row of `response` into the target directory, in row order.
    pub fn fetch(&self, response: &QueryResponse) -> Result<Vec<FetchedFile>> {
        let mut out = Vec::with_capacity(response.len());
        for row in response {
            out.push(self.fetch_url(&row.url)?);
        }
        Ok(out)
    }

    pub fn fetch_url(&self, url: &str) -> Result<FetchedFile> {
        let target = self.target_for(url);
        let bytes = self.download(url, &target)?;
        tracing::info!(url, path = %target.display(), bytes, "downloaded");
        Ok(FetchedFile {
            url: url.to_string(),
            path: target,
            bytes,
        })
    }

    /// Local path a URL is saved under.
    pub fn target_for(&self, url: &str) -> PathBuf {
        let name = guess_filename_from_url(url).unwrap_or_else(|| "download".to_string());
        self.dir.join(name)
    }

    fn download(&self, url: &str, target: &Path) -> Result<u64> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
        }

        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("could not connect to {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(format_http_error(status, url, &body));
        }

        let pb = self.progress_bar(resp.content_length())?;
        let mut out = BufWriter::new(
            File::create(target).with_context(|| format!("failed to open {}", target.display()))?,
        );

        let written = match &pb {
            Some(pb) => io::copy(&mut pb.wrap_read(resp), &mut out),
            None => io::copy(&mut { resp }, &mut out),
        }
        .with_context(|| format!("download interrupted: {}", url))?;
        out.flush()?;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        Ok(written)
    }

    fn progress_bar(&self, len: Option<u64>) -> Result<Option<ProgressBar>> {
        if !self.progress {
            return Ok(None);
        }
        let pb = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} {bytes}/{total_bytes} ({bytes_per_sec}) {wide_bar} {eta}",
            )?
            .progress_chars("=>-"),
        );
        Ok(Some(pb))
    }
}
