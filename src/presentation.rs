//! Console front end.
//!
//! Stands in for the popup list: reads one command per line from stdin,
//! prints the filtered history, and forwards every action to [`Activation`].
//! Indices in `select` and `pin` refer to the list most recently printed.

use std::sync::Arc;

use ch_app::Activation;
use ch_core::entry::display_title;
use ch_core::{Entry, EntryId, HistorySnapshot};
use ch_platform::InMemoryHotkeyRegistrar;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const TITLE_WIDTH: usize = 72;

pub const HELP: &str = "\
commands:
  list [query]       show history, optionally filtered
  select <n>         copy entry n back to the clipboard
  pin <n>            pin or unpin entry n
  clear              remove every entry, pinned included
  max <n>            set history size (clamped to 5..=500)
  autopaste on|off   paste after select
  hotkey             simulate the global hotkey
  help               this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(String),
    Select(usize),
    Pin(usize),
    Clear,
    MaxItems(i64),
    AutoPaste(bool),
    Hotkey,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{command}` expects {expected}, got `{got}`")]
    InvalidArgument {
        command: &'static str,
        expected: &'static str,
        got: String,
    },
}

fn parse_index(command: &'static str, arg: Option<&str>) -> Result<usize, CommandParseError> {
    let arg = arg.ok_or(CommandParseError::MissingArgument(command))?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandParseError::InvalidArgument {
            command,
            expected: "a list position starting at 1",
            got: arg.to_string(),
        }),
    }
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let command = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "list" | "ls" => Command::List(rest.to_string()),
        "select" | "s" => Command::Select(parse_index("select", arg)?),
        "pin" | "p" => Command::Pin(parse_index("pin", arg)?),
        "clear" => Command::Clear,
        "max" => {
            let arg = arg.ok_or(CommandParseError::MissingArgument("max"))?;
            let n = arg
                .parse::<i64>()
                .map_err(|_| CommandParseError::InvalidArgument {
                    command: "max",
                    expected: "a number",
                    got: arg.to_string(),
                })?;
            Command::MaxItems(n)
        }
        "autopaste" => match arg.map(str::to_lowercase).as_deref() {
            Some("on") => Command::AutoPaste(true),
            Some("off") => Command::AutoPaste(false),
            Some(other) => {
                return Err(CommandParseError::InvalidArgument {
                    command: "autopaste",
                    expected: "on or off",
                    got: other.to_string(),
                })
            }
            None => return Err(CommandParseError::MissingArgument("autopaste")),
        },
        "hotkey" => Command::Hotkey,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// One line per entry, 1-based, pinned entries marked with `*`.
pub fn render_list(entries: &[&Entry], snapshot: &HistorySnapshot) -> String {
    let mut out = format!(
        "history: {} of {} (auto-paste {})\n",
        snapshot.items.len(),
        snapshot.max_items,
        if snapshot.auto_paste_enabled { "on" } else { "off" }
    );
    if entries.is_empty() {
        out.push_str("  (no matching entries)\n");
    }
    for (index, entry) in entries.iter().enumerate() {
        let marker = if entry.is_pinned { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker}{:>3}  {}\n",
            index + 1,
            truncate(&display_title(entry), TITLE_WIDTH)
        ));
    }
    out
}

pub struct ConsolePresenter {
    activation: Arc<Activation>,
    hotkeys: Arc<InMemoryHotkeyRegistrar>,
    /// Ids in the order last printed.
    shown: Vec<EntryId>,
    query: String,
}

impl ConsolePresenter {
    pub fn new(activation: Arc<Activation>, hotkeys: Arc<InMemoryHotkeyRegistrar>) -> Self {
        Self {
            activation,
            hotkeys,
            shown: Vec::new(),
            query: String::new(),
        }
    }

    fn shown_id(&self, position: usize) -> Option<&EntryId> {
        self.shown.get(position.checked_sub(1)?)
    }

    async fn show(&mut self) {
        let snapshot = self.activation.snapshot().await;
        let entries: Vec<&Entry> = snapshot.filtered(&self.query).collect();
        self.shown = entries.iter().map(|entry| entry.id.clone()).collect();
        print!("{}", render_list(&entries, &snapshot));
    }

    /// Returns `false` when the presenter should exit.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::List(query) => {
                self.query = query;
                self.show().await;
            }
            Command::Select(position) => match self.shown_id(position).cloned() {
                Some(id) => match self.activation.select(&id).await {
                    Ok(true) => println!("copied entry {position}"),
                    Ok(false) => println!("entry {position} is gone, `list` again"),
                    Err(err) => println!("select failed: {err:#}"),
                },
                None => println!("no entry {position}, `list` first"),
            },
            Command::Pin(position) => match self.shown_id(position).cloned() {
                Some(id) => match self.activation.toggle_pin(&id).await {
                    Some(pinned) => {
                        println!("{} entry {position}", if pinned { "pinned" } else { "unpinned" });
                        self.show().await;
                    }
                    None => println!("entry {position} is gone, `list` again"),
                },
                None => println!("no entry {position}, `list` first"),
            },
            Command::Clear => {
                let removed = self.activation.clear().await;
                self.shown.clear();
                println!("removed {removed} entries");
            }
            Command::MaxItems(n) => {
                let evicted = self.activation.set_max_items(n).await;
                let snapshot = self.activation.snapshot().await;
                println!(
                    "history size {} ({} evicted)",
                    snapshot.max_items,
                    evicted.len()
                );
            }
            Command::AutoPaste(enabled) => {
                self.activation.set_auto_paste(enabled).await;
                println!("auto-paste {}", if enabled { "on" } else { "off" });
            }
            Command::Hotkey => {
                if !self.hotkeys.trigger() {
                    println!("no hotkey registered");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    /// Hotkey pressed: reset the filter and show the full list.
    pub async fn on_hotkey(&mut self) {
        self.query.clear();
        self.show().await;
    }

    /// Read stdin until EOF, `quit` or cancellation.
    ///
    /// `hotkey_rx` carries presses from the registrar callback, including the
    /// ones the `hotkey` command simulates.
    pub async fn run(
        mut self,
        mut hotkey_rx: mpsc::UnboundedReceiver<()>,
        shutdown: CancellationToken,
    ) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut updates = self.activation.subscribe();
        println!("{HELP}");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                Some(()) = hotkey_rx.recv() => self.on_hotkey().await,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let count = updates.borrow_and_update().items.len();
                    debug!(count, "History updated");
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Some(command)) => {
                            if !self.handle(command).await {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(err) => println!("{err}"),
                    },
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to read stdin");
                        break;
                    }
                },
            }
        }
        shutdown.cancel();
    }
}
