//! Mockdown - preview structured message text in the terminal.
//!
//! This binary reads documents from files or stdin, segments them into
//! blocks, dispatches the blocks to visual nodes and paints them.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, warn, LevelFilter};
use std::io::{self, Read, Write};
use std::time::Duration;

use mockdown_config::Config;
use mockdown_core::{outline, Block, BlockContent, MockdownError, Result};
use mockdown_parser::Segmenter;
use mockdown_render::{CopyFeedback, Dispatcher, Osc52Clipboard, Painter, ThreadScheduler};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }
    if cli.list_themes {
        cli::show_themes();
        return;
    }

    setup_logging(&cli.log_level);
    info!("mockdown v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load_with_override(cli.config.as_deref())?;
    cli.apply(&mut config);
    debug!("Effective config: {:?}", config);

    let documents = read_documents(cli)?;
    let segmenter = Segmenter::with_options(config.features.segment_options());
    let dispatcher = Dispatcher::from_config(&config);
    let painter = Painter::from_config(&config, cli::terminal_width());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last_code: Option<String> = None;

    for (name, text) in &documents {
        info!("Processing {}", name);
        let blocks = segmenter.segment(text);
        debug!("{}: {} blocks", name, blocks.len());

        if let Some(code) = last_code_block(&blocks) {
            last_code = Some(code.to_string());
        }

        if cli.outline {
            writeln!(out, "{}", outline(&blocks))?;
            continue;
        }

        let nodes = dispatcher.render_document(&blocks, config.style.variant);
        for line in painter.paint(&nodes) {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    drop(out);

    if cli.copy {
        copy_code(&config, last_code.as_deref())?;
    }
    Ok(())
}

/// Read every input as (display name, contents).
fn read_documents(cli: &Cli) -> Result<Vec<(String, String)>> {
    if cli.should_read_stdin() {
        if atty::is(atty::Stream::Stdin) {
            info!("Reading from terminal; end input with Ctrl-D");
        }
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(vec![("<stdin>".to_string(), text)]);
    }

    cli.files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn last_code_block(blocks: &[Block]) -> Option<&str> {
    blocks.iter().rev().find_map(|block| match &block.content {
        BlockContent::Code { code, .. } => Some(code.as_str()),
        _ => None,
    })
}

/// Copy `code` to the terminal clipboard and show the feedback until it
/// reverts.
fn copy_code(config: &Config, code: Option<&str>) -> Result<()> {
    if !config.features.clipboard {
        warn!("Clipboard is disabled in the configuration");
        return Ok(());
    }
    let Some(code) = code else {
        warn!("No code block to copy");
        return Ok(());
    };
    if !atty::is(atty::Stream::Stdout) {
        return Err(MockdownError::Clipboard(
            "stdout is not a terminal".to_string(),
        ));
    }

    let reset = config.style.copy_reset();
    let mut feedback =
        CopyFeedback::new(ThreadScheduler::new(), Osc52Clipboard::new(io::stdout())).with_reset_after(reset);
    feedback.copy(code);

    if let Some(e) = feedback.last_clipboard_error() {
        eprintln!("Copy failed: {}", e);
        return Ok(());
    }
    eprint!("Copied!");
    io::stderr().flush()?;

    // Hold the indicator until the reset timer fires
    while feedback.is_copied() {
        match feedback.scheduler().recv_timeout(reset + Duration::from_secs(1)) {
            Some(id) => {
                feedback.on_timer(id);
            }
            None => break,
        }
    }
    eprint!("\r       \r");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockdown_parser::segment;

    #[test]
    fn test_last_code_block() {
        let blocks = segment("```\nfirst\n```\n\ntext\n\n```py\nsecond\n```\n\nafter");
        assert_eq!(last_code_block(&blocks), Some("second"));
        assert_eq!(last_code_block(&segment("no code")), None);
    }

    #[test]
    fn test_copy_disabled_is_noop() {
        let config = Config::from_layers(&["[features]\nClipboard = false"]).unwrap();
        assert!(copy_code(&config, Some("x")).is_ok());
    }

    #[test]
    fn test_copy_without_code_is_noop() {
        assert!(copy_code(&Config::default(), None).is_ok());
    }
}
