//! folio terminal entry point.
//!
//! Boots the portfolio terminal full-screen in the current TTY. Type
//! commands as on the web page; Escape or Ctrl+C quits.
//!
//! Usage: `folio [lang=<code> | --lang <code>] [--serve]`. With `--serve`
//! the save server runs in-process and edits show up in the terminal.

mod keys;
mod screen;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use folio_content::ContentStore;
use folio_server::{SaveServer, ServerState};
use folio_terminal::locale::{self, FilePreferences, MemoryPreferences, PageKind, PreferenceStore};
use folio_terminal::{
    BufferSink, ContentSource, InputAction, InputController, Interpreter, SharedSink,
    TerminalHandle,
};
use folio_types::config::FolioConfig;

use keys::AppEvent;
use screen::Screen;

/// Lines kept in the output buffer.
const SCROLLBACK_LINES: usize = 500;

/// Redraw cadence while output is changing.
const FRAME: Duration = Duration::from_millis(16);

type TerminalSink = SharedSink<BufferSink>;

/// Command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct AppArgs {
    /// Query string, e.g. `lang=ja`.
    query: String,
    serve: bool,
}

impl AppArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut out = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--serve" => out.serve = true,
                "--lang" => {
                    if let Some(code) = args.next() {
                        out.query = format!("lang={code}");
                    }
                },
                _ => out.query = arg,
            }
        }
        out
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log lines would tear the full-screen UI, so only log when asked to.
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let args = AppArgs::parse(std::env::args().skip(1));
    let config = FolioConfig::from_env()?;
    log::info!("Starting folio ({})", config.hostname);

    let mut prefs: Box<dyn PreferenceStore> = match FilePreferences::open(&config.preferences_path)
    {
        Ok(prefs) => Box::new(prefs),
        Err(e) => {
            log::warn!("Preferences unavailable ({e}), keeping them in memory");
            Box::new(MemoryPreferences::new())
        },
    };
    let language = locale::init_language(
        prefs.as_mut(),
        &args.query,
        PageKind::Configurable,
        config.default_language,
    );

    let content = ContentSource::from_load(ContentStore::load(
        &config.translations_path,
        &config.projects_path,
    ));
    if args.serve {
        spawn_server(&config, &content).await?;
    }

    let sink = SharedSink::new(BufferSink::with_scrollback(SCROLLBACK_LINES));
    let hostname = config.hostname.clone();
    let interpreter = Interpreter::new(config, content, sink.clone(), language).with_preferences(prefs);
    let handle = TerminalHandle::spawn(interpreter);
    let input = handle.input_controller();

    let screen = Screen::enter()?;
    run(screen, &handle, input, &sink, &hostname).await
}

/// Run the save server next to the terminal, sharing its content store.
async fn spawn_server(config: &FolioConfig, content: &ContentSource) -> Result<()> {
    let mut state = ServerState::new(
        config.projects_path.clone(),
        config.server.static_root.clone(),
    );
    if let ContentSource::Ready(store) = content {
        state = state.with_store(Arc::clone(store));
    }
    let server = SaveServer::bind(("127.0.0.1", config.server.port), state).await?;
    log::info!("Save server listening on http://{}", server.local_addr()?);
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            log::error!("Save server stopped: {e}");
        }
    });
    Ok(())
}

/// Main loop: forward keys to the input controller and redraw whenever
/// the output buffer, the pending line or the boot state changes.
async fn run(
    mut screen: Screen,
    handle: &TerminalHandle<TerminalSink>,
    mut input: InputController,
    sink: &TerminalSink,
    hostname: &str,
) -> Result<()> {
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_keys(key_tx));

    let mut ticker = tokio::time::interval(FRAME);
    let mut drawn_revision = None;
    let mut was_booting = handle.is_booting();
    let mut dirty = true;

    loop {
        tokio::select! {
            event = key_rx.recv() => match event {
                Some(AppEvent::Key(key)) => {
                    if input.handle_key(key) != InputAction::Ignored {
                        dirty = true;
                    }
                },
                Some(AppEvent::Redraw) => dirty = true,
                Some(AppEvent::Quit) | None => break,
            },
            _ = ticker.tick() => {},
        }

        let booting = handle.is_booting();
        let revision = sink.with(BufferSink::revision);
        if dirty || booting != was_booting || drawn_revision != Some(revision) {
            let lines = sink.with(|s| s.lines().to_vec());
            let prompt = (!booting).then(|| {
                format!(
                    "{}{}_",
                    handle.session().prompt(hostname),
                    input.pending()
                )
            });
            screen.draw(&lines, prompt.as_deref())?;
            drawn_revision = Some(revision);
            was_booting = booting;
            dirty = false;
        }
    }
    log::info!("Shutting down");
    Ok(())
}

/// Blocking crossterm reader, run on its own thread.
fn read_keys(tx: mpsc::UnboundedSender<AppEvent>) {
    loop {
        match crossterm::event::read() {
            Ok(event) => {
                if let Some(app_event) = keys::convert_event(&event)
                    && tx.send(app_event).is_err()
                {
                    return;
                }
            },
            Err(e) => {
                log::error!("Reading terminal events failed: {e}");
                let _ = tx.send(AppEvent::Quit);
                return;
            },
        }
    }
}
