// Arch Package Search - Launcher Host Adapter
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line-delimited JSON loop for launcher hosts
//!
//! The host writes one query per line to our stdin and reads exactly one
//! `SearchResponse` JSON line back per query, in order.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::core::QueryProcessor;
use crate::format::{ItemFormatter, SearchResponse, build_error_response, build_response};
use crate::{log_debug, log_notice};

/// Answer queries from `reader` until EOF. Returns the number handled.
pub async fn serve<R, W>(
    processor: &QueryProcessor,
    formatter: &ItemFormatter,
    mut reader: R,
    mut writer: W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut handled = 0;
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .await
            .context("Failed to read query")?;
        if read == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buffer) {
            Ok(line) => {
                let query = line.trim_end_matches(['\r', '\n']);
                log_debug!("Host query: {:?}", query);
                let outcome = processor.run(query).await;
                build_response(query, &outcome, formatter.items(&outcome))
            }
            Err(e) => {
                log_notice!("Host sent a query that is not valid UTF-8: {}", e);
                build_error_response("", "query is not valid UTF-8")
            }
        };

        write_response(&mut writer, &response).await?;
        handled += 1;
    }

    Ok(handled)
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &SearchResponse) -> Result<()> {
    let mut encoded = serde_json::to_string(response).context("Failed to encode response")?;
    encoded.push('\n');
    writer
        .write_all(encoded.as_bytes())
        .await
        .context("Failed to write response")?;
    writer.flush().await.context("Failed to flush response")?;
    Ok(())
}

/// Serve the process's stdin/stdout
pub async fn run_stdio_server(processor: &QueryProcessor, formatter: &ItemFormatter) -> Result<usize> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(processor, formatter, stdin, stdout).await
}
