/*
 * Arch Package Search
 * Copyright (C) 2025 Akaere Networks
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{Context, Result};
use clap::Parser;

use arch_pkg_search::config::{Cli, OutputFormat, Settings};
use arch_pkg_search::core::logger::{self, init_from_args};
use arch_pkg_search::format::{ItemFormatter, Markup, build_response, render_items};
use arch_pkg_search::server::run_stdio_server;
use arch_pkg_search::services::generate_help_response;
use arch_pkg_search::{QueryProcessor, QueryType, log_error};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    if let Err(e) = init_from_args(args.debug, args.journald, args.no_color) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let settings = Settings::load(&args).inspect_err(|e| log_error!("{:#}", e))?;

    if args.serve {
        return serve(settings).await;
    }

    let input = args.query.join(" ");
    let markup = match args.format {
        OutputFormat::Json | OutputFormat::Html => Markup::Html,
        OutputFormat::Text if !args.no_color && atty::is(atty::Stream::Stdout) => Markup::Ansi,
        OutputFormat::Text => Markup::Plain,
    };

    let formatter = ItemFormatter::new(markup, &settings);
    let processor = QueryProcessor::new(settings)?;
    let outcome = processor.run(&input).await;

    if outcome.query == QueryType::Help && args.format == OutputFormat::Text {
        print!("{}", generate_help_response(processor.settings()));
        return Ok(());
    }

    let items = formatter.items(&outcome);
    match args.format {
        OutputFormat::Json => {
            let response = build_response(&input, &outcome, items);
            let json =
                serde_json::to_string_pretty(&response).context("Failed to encode response")?;
            println!("{}", json);
        }
        OutputFormat::Text | OutputFormat::Html => print!("{}", render_items(&items)),
    }

    if !outcome.is_success() {
        anyhow::bail!("No package source could be reached");
    }
    Ok(())
}

async fn serve(settings: Settings) -> Result<()> {
    logger::log_task_start("Serving launcher queries on stdin");

    let formatter = ItemFormatter::new(Markup::Html, &settings);
    let processor = QueryProcessor::new(settings)?;
    let handled = run_stdio_server(&processor, &formatter).await?;

    logger::log_task_complete_with_details("Launcher session finished", &format!("{} queries", handled));
    Ok(())
}
