mod bridge;
mod commands;
mod config;
mod history;
mod host;
mod render;

use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, bail};
use findlight_search::{Document, FindEngine};
use parking_lot::Mutex;

use bridge::FindWorker;
use host::{Host, Step};
use render::{BoardSink, HighlightBoard};

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const PROMPT: &str = "find> ";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("findlight: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let path = document_path()?;
    let document = Document::from_path(&path)
        .with_context(|| format!("failed to load document {}", path.display()))?;
    log::debug!("Loaded {} nodes from {}", document.len(), path.display());

    let app_config = config::AppConfig::load_or_create();

    let board = Arc::new(Mutex::new(HighlightBoard::default()));
    let sink = BoardSink::new(board.clone());
    let engine = FindEngine::new(document.clone(), sink.clone(), sink);
    let client = FindWorker::spawn(engine).context("failed to start find worker")?;
    let mut host = Host::new(client, board, document, &app_config);

    println!("findlight {APP_VERSION}: type a keyword, or :help for commands");

    smol::block_on(async {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut lines = stdin.lock().lines();

        loop {
            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;

            let Some(line) = lines.next() else {
                host.handle_line(":quit").await;
                break;
            };
            let line = line.context("failed to read input")?;

            match host.handle_line(&line).await {
                Step::Output(text) => write!(stdout, "{text}")?,
                Step::Quit => break,
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}

fn document_path() -> anyhow::Result<PathBuf> {
    let mut args = env::args_os().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        bail!("usage: findlight <DOCUMENT.json>");
    };
    Ok(PathBuf::from(path))
}
