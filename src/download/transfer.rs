// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Streaming file transfer
//!
//! Downloads a URL to a local file in one pass, resuming from whatever
//! is already on disk via a `Range` request. The transfer itself never
//! retries; callers decide whether to start over, and a later attempt
//! picks up from the partial file.

use crate::download::cancel::CancelToken;
use crate::error::{Result, StreamioError};
use futures_util::StreamExt;
use reqwest::{header, Client, StatusCode};
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

const WRITE_BUFFER_SIZE: usize = 8192;

/// Turns byte counts into the percentage ticks reported to the UI.
///
/// Ticks are clamped to `[0, 100]`, never decrease, and repeats are
/// suppressed. With an unknown expected size no ticks are produced.
#[derive(Debug)]
pub struct ProgressMeter {
    expected: u64,
    written: u64,
    last_tick: Option<f64>,
}

impl ProgressMeter {
    /// `expected` is the total transfer size in bytes; zero means unknown.
    pub fn new(expected: u64) -> Self {
        Self {
            expected,
            written: 0,
            last_tick: None,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Account for `bytes` more written; returns the percentage to report,
    /// or `None` when there is nothing new to say.
    pub fn advance(&mut self, bytes: u64) -> Option<f64> {
        self.written += bytes;
        if self.expected == 0 {
            return None;
        }

        let mut pct = (self.written as f64 / self.expected as f64) * 100.0;
        pct = pct.clamp(0.0, 100.0);
        if let Some(last) = self.last_tick {
            if pct <= last {
                return None;
            }
        }
        self.last_tick = Some(pct);
        Some(pct)
    }
}

/// Stream `url` into `dest`, reporting progress ticks through `on_progress`.
/// Returns the total byte count on disk when the transfer is complete.
///
/// If `dest` already holds a partial file the request asks the server for
/// the remainder; a server that answers a range request with `200 OK` does
/// not support resume, and the file is rewritten from the start.
pub async fn transfer_to_file(
    client: &Client,
    url: &str,
    dest: &Path,
    cancel: CancelToken,
    mut on_progress: impl FnMut(f64),
) -> Result<u64> {
    let resume_from = match fs::metadata(dest).await {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(e.into()),
    };

    let mut request = client.get(url);
    if resume_from > 0 {
        request = request.header(header::RANGE, format!("bytes={resume_from}-"));
    }
    let response = request.send().await.map_err(|e| {
        StreamioError::network_error(
            format!("request to {} failed: {}", url, e),
            e.is_timeout() || e.is_connect(),
        )
    })?;

    let status = response.status();
    let (start_at, expected_total) = match status {
        StatusCode::OK => {
            let total = response.content_length().unwrap_or(0);
            (0, total)
        }
        StatusCode::PARTIAL_CONTENT => {
            let total = response
                .headers()
                .get(header::CONTENT_RANGE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_content_range_total)
                .unwrap_or(0);
            (resume_from, total)
        }
        // requested range starts at or past the end: nothing left to fetch
        StatusCode::RANGE_NOT_SATISFIABLE => return Ok(resume_from),
        _ => {
            return Err(StreamioError::UnexpectedStatusCode {
                status_code: status.as_u16(),
                url: url.to_string(),
            })
        }
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    let file = if start_at > 0 {
        OpenOptions::new().append(true).open(dest).await?
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(dest)
            .await?
    };
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    let mut meter = ProgressMeter::new(expected_total);
    if start_at > 0 {
        if let Some(pct) = meter.advance(start_at) {
            on_progress(pct);
        }
    }

    let mut stream = response.bytes_stream();
    let mut cancel = cancel;
    let cancelled = cancel.cancelled();
    tokio::pin!(cancelled);

    loop {
        tokio::select! {
            chunk = stream.next() => {
                let chunk = match chunk {
                    Some(Ok(bytes)) => bytes,
                    Some(Err(e)) => {
                        writer.flush().await?;
                        return Err(StreamioError::network_error(
                            format!("stream from {} broke: {}", url, e),
                            true,
                        ));
                    }
                    None => break,
                };
                writer.write_all(&chunk).await?;
                if let Some(pct) = meter.advance(chunk.len() as u64) {
                    on_progress(pct);
                }
            }
            _ = &mut cancelled => {
                writer.flush().await?;
                log::info!("transfer to {:?} cancelled at {} bytes", dest, meter.written());
                return Err(StreamioError::Cancelled);
            }
        }
    }
    writer.flush().await?;

    // meter counts the resumed prefix too, so this is the on-disk total
    if expected_total > 0 && meter.written() < expected_total {
        return Err(StreamioError::DownloadFailed(format!(
            "transfer ended early: {} of {} bytes",
            meter.written(),
            expected_total
        )));
    }
    Ok(meter.written())
}

/// Total size out of a `Content-Range: bytes start-end/total` header.
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_emits_cumulative_ticks() {
        let mut meter = ProgressMeter::new(100);
        assert_eq!(meter.advance(10), Some(10.0));
        assert_eq!(meter.advance(45), Some(55.0));
        assert_eq!(meter.advance(45), Some(100.0));
        assert_eq!(meter.written(), 100);
    }

    #[test]
    fn test_meter_clamps_overshoot() {
        let mut meter = ProgressMeter::new(50);
        assert_eq!(meter.advance(40), Some(80.0));
        // server sent more than it promised
        assert_eq!(meter.advance(40), Some(100.0));
        assert_eq!(meter.advance(40), None);
    }

    #[test]
    fn test_meter_suppresses_repeats() {
        let mut meter = ProgressMeter::new(1000);
        assert_eq!(meter.advance(5), Some(0.5));
        assert_eq!(meter.advance(0), None);
        assert!(meter.advance(5).is_some());
    }

    #[test]
    fn test_meter_unknown_total_stays_quiet() {
        let mut meter = ProgressMeter::new(0);
        assert_eq!(meter.advance(4096), None);
        assert_eq!(meter.written(), 4096);
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("bytes 100-199/4096"), Some(4096));
        assert_eq!(parse_content_range_total("bytes */1024"), Some(1024));
        assert_eq!(parse_content_range_total("bytes 0-99"), None);
        assert_eq!(parse_content_range_total("bytes 0-99/*"), None);
    }
}
