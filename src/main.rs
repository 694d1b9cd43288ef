/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;

use ilofan::api::HttpFanClient;
use ilofan::app::App;
use ilofan::config::{load_config, resolve_settings};
use ilofan::events::handle_event;
use ilofan::logger;
use ilofan::ui::{render_loading, ui};

/// TUI for the iLO fan controller REST API
#[derive(Parser, Debug)]
#[command(name = "ilofan", version, about)]
struct Args {
    /// Base URL of the controller (default: http://localhost:1234)
    #[arg(long = "host", visible_alias = "base-url", value_name = "URL")]
    base_url: Option<String>,

    /// Append JSON event lines to the log file
    #[arg(long)]
    logging: bool,

    /// Log destination used with --logging
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Read settings from this file instead of ~/.config/ilofan/config.json
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err:#}");
        logger::log_event("fatal_error", serde_json::json!({ "error": format!("{err:#}") }));
        logger::shutdown_logging();
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let saved = load_config(args.config.as_deref())?;
    let settings = resolve_settings(args.base_url, args.logging, args.log_file, &saved)?;

    if settings.logging {
        if let Err(e) = logger::init_logging(&settings.log_file) {
            eprintln!("warning: logging disabled ({}): {}", settings.log_file.display(), e);
        }
        logger::log_event("startup", serde_json::json!({
            "base_url": settings.base_url,
        }));
    }

    let client = HttpFanClient::new(&settings.base_url)?;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;

    logger::log_event("shutdown", serde_json::json!({}));
    logger::shutdown_logging();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    client: HttpFanClient,
) -> anyhow::Result<()> {
    let base_url = client.base_url().to_string();
    terminal.draw(|f| render_loading(f, &base_url))?;

    // Blocks for at most one request timeout
    let mut app = App::new(Box::new(client), base_url);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // One event at a time; network calls block here until done
        if handle_event(&mut app, event::read()?) {
            return Ok(());
        }
    }
}
