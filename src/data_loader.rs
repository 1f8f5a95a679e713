//! Data loader module for billing exports in JSONL format
//!
//! A billing export is either a single JSONL file or a directory tree of
//! them. Each non-blank line holds one [`BillingRecord`]:
//!
//! ```text
//! {"service":"AmazonEC2","resource_type":"m5.large","pricing_model":"on-demand","cost":"10.00","hours_used":"5"}
//! {"service":"AmazonS3","cost":"4.25"}
//! ```
//!
//! Files are read in sorted path order so that the resulting collection,
//! and every report built from it, is reproducible. A line that does not
//! parse stops loading with [`CostMinerError::Parse`].
//!
//! # Examples
//!
//! ```no_run
//! use costminer::data_loader::DataLoader;
//!
//! # async fn example() -> costminer::Result<()> {
//! let loader = DataLoader::new("./billing")?;
//! let billing = loader.load_collection().await?;
//! println!("Loaded {} billing records", billing.len());
//! # Ok(())
//! # }
//! ```

use costminer_core::error::{CostMinerError, Result};
use costminer_core::{BillingCollection, BillingRecord};
use futures::StreamExt;
use futures::stream::Stream;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Loader for JSONL billing exports
#[derive(Debug, Clone)]
pub struct DataLoader {
    /// File or directory to read from
    input: PathBuf,
    /// Whether to show a spinner while loading
    show_progress: bool,
}

impl DataLoader {
    /// Create a loader for a JSONL file or a directory of JSONL files
    ///
    /// # Errors
    ///
    /// Returns [`CostMinerError::InvalidArgument`] if the path does not exist
    pub fn new(input: impl Into<PathBuf>) -> Result<Self> {
        let input = input.into();
        if !input.exists() {
            return Err(CostMinerError::InvalidArgument(format!(
                "Billing export not found: {}",
                input.display()
            )));
        }

        Ok(Self {
            input,
            show_progress: false,
        })
    }

    /// Enable or disable the loading spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The file or directory this loader reads
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Find all JSONL files under the input path, in sorted order
    ///
    /// A file input is returned as is, whatever its extension.
    pub async fn find_jsonl_files(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        let root = self.input.clone();
        let files = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
            let mut files = Vec::new();
            for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|e| CostMinerError::Io(e.into()))?;
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().and_then(|s| s.to_str()) == Some("jsonl")
                {
                    files.push(path.to_path_buf());
                }
            }
            Ok(files)
        })
        .await
        .map_err(|e| CostMinerError::Io(std::io::Error::other(e.to_string())))??;

        debug!(
            "Found {} JSONL files under {}",
            files.len(),
            self.input.display()
        );
        Ok(files)
    }

    /// Load billing records as an async stream
    ///
    /// Records are yielded file by file, line by line. The stream ends after
    /// the first error.
    pub fn load_records(&self) -> impl Stream<Item = Result<BillingRecord>> + '_ {
        async_stream::stream! {
            let files = match self.find_jsonl_files().await {
                Ok(files) => files,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for file_path in files {
                let records = Self::parse_jsonl_stream(file_path);
                tokio::pin!(records);
                while let Some(result) = records.next().await {
                    let failed = result.is_err();
                    yield result;
                    if failed {
                        return;
                    }
                }
            }
        }
    }

    /// Load and validate every record into a [`BillingCollection`]
    ///
    /// # Errors
    ///
    /// Returns the first I/O or parse error, or
    /// [`CostMinerError::InvalidRecord`] if a record breaks a data-model
    /// invariant. The index in that error counts records across all files.
    pub async fn load_collection(&self) -> Result<BillingCollection> {
        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} records")
            {
                pb.set_style(style);
            }
            pb.set_message("Loading billing records");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut records = Vec::new();
        let stream = self.load_records();
        tokio::pin!(stream);
        while let Some(result) = stream.next().await {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    if let Some(pb) = &progress {
                        pb.abandon_with_message("Failed to load billing records");
                    }
                    return Err(e);
                }
            };
            records.push(record);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            "Loaded {} billing records from {}",
            records.len(),
            self.input.display()
        );
        BillingCollection::new(records)
    }

    /// Parse a single JSONL file as a stream
    fn parse_jsonl_stream(path: PathBuf) -> impl Stream<Item = Result<BillingRecord>> {
        async_stream::stream! {
            let file = match tokio::fs::File::open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let reader = BufReader::new(file);
            let mut lines = reader.lines();
            let mut line_number = 0;

            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(e.into());
                        return;
                    }
                };
                line_number += 1;

                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<BillingRecord>(&line) {
                    Ok(record) => yield Ok(record),
                    Err(e) => {
                        yield Err(CostMinerError::Parse {
                            file: path.clone(),
                            line: line_number,
                            error: e.to_string(),
                        });
                        return;
                    }
                }
            }
        }
    }
}
