// Interactive line session over a Session

use crate::filter::Filter;
use crate::models::{ArtifactKind, Category, ItemStatus};
use crate::ops::{Op, Outcome, Session};
use crate::render::Renderer;
use chrono::NaiveDate;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  add [@category] <title>        add an item (default category if omitted)
  edit <item>                    open an item for editing
  title <text>                   rename the open item
  describe <text>                set the open item's description
  move <category>                move the open item on save
  status <status>                backlog | ready | in-progress | completed
  end-date <YYYY-MM-DD|none>     set or clear the open item's end date
  task <title>                   add a task to the open item
  toggle <task>                  complete or reopen a task
  untask <task>                  delete a task
  artifact <type> <content>      link | text | file | image
  save | cancel                  apply or discard the open item
  delete [item]                  delete an item (the open one if omitted)
  list [category] [filter...]    e.g. list projects status=ready open_tasks>0
  show [item]                    show an item (the open one if omitted)
  help | quit
";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Op(Op),
    List {
        category: Option<Category>,
        filters: Vec<Filter>,
    },
    Show {
        item: Option<String>,
    },
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "add" => {
            let (category, title) = match rest.strip_prefix('@') {
                Some(tagged) => {
                    let (name, title) = tagged.split_once(char::is_whitespace).unwrap_or((tagged, ""));
                    (Some(name.parse::<Category>()?), title.trim())
                }
                None => (None, rest),
            };
            Command::Op(Op::Add {
                title: title.to_string(),
                category,
            })
        }
        "edit" => Command::Op(Op::Edit {
            item: required(rest, "edit <item>")?,
        }),
        "title" => Command::Op(Op::Title {
            title: rest.to_string(),
        }),
        "describe" => Command::Op(Op::Describe {
            description: rest.to_string(),
        }),
        "move" => Command::Op(Op::Move {
            category: required(rest, "move <category>")?.parse()?,
        }),
        "status" => Command::Op(Op::Status {
            status: required(rest, "status <status>")?.parse::<ItemStatus>()?,
        }),
        "end-date" => {
            let raw = required(rest, "end-date <YYYY-MM-DD|none>")?;
            let date = match raw.to_lowercase().as_str() {
                "none" | "clear" => None,
                _ => Some(
                    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date: {} (expected YYYY-MM-DD)", raw))?,
                ),
            };
            Command::Op(Op::EndDate { date })
        }
        "task" => Command::Op(Op::Task {
            title: rest.to_string(),
        }),
        "toggle" => Command::Op(Op::Toggle {
            task: required(rest, "toggle <task>")?,
        }),
        "untask" => Command::Op(Op::Untask {
            task: required(rest, "untask <task>")?,
        }),
        "artifact" => {
            let usage = "artifact <type> <content>";
            let (kind, content) = required(rest, usage)?
                .split_once(char::is_whitespace)
                .map(|(k, c)| (k.to_string(), c.trim().to_string()))
                .unwrap_or((rest.to_string(), String::new()));
            Command::Op(Op::Artifact {
                kind: kind.parse::<ArtifactKind>()?,
                content,
            })
        }
        "save" => Command::Op(Op::Save),
        "cancel" => Command::Op(Op::Cancel),
        "delete" => Command::Op(Op::Delete { item: optional(rest) }),
        "list" | "ls" => {
            let mut words = rest.split_whitespace().peekable();
            let category = match words.peek() {
                Some(first) if !first.contains(['=', '<', '>', '~']) => {
                    let category = first.parse::<Category>()?;
                    words.next();
                    Some(category)
                }
                _ => None,
            };
            let filters = words.map(str::parse::<Filter>).collect::<Result<Vec<_>>>()?;
            Command::List { category, filters }
        }
        "show" => Command::Show { item: optional(rest) },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(eyre!("Unknown command: {} (try help)", other)),
    };

    Ok(Some(command))
}

fn required(rest: &str, usage: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(eyre!("Usage: {}", usage));
    }
    Ok(rest.to_string())
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Execute one command, writing any output
///
/// Returns false when the session should end.
pub fn execute<W: Write>(session: &mut Session, renderer: &Renderer, command: Command, out: &mut W) -> Result<bool> {
    match command {
        Command::Op(op) => {
            if session.apply(op)? == Outcome::Ignored {
                writeln!(out, "(ignored)")?;
            }
        }
        Command::List { category, filters } => match category {
            Some(category) => {
                let items = session.store().list_filtered(category, &filters);
                write!(out, "{}", renderer.listing(category, &items)?)?;
            }
            None if filters.is_empty() => {
                write!(out, "{}", renderer.board(session.store().state())?)?;
            }
            None => {
                for category in Category::ALL {
                    let items = session.store().list_filtered(category, &filters);
                    write!(out, "{}", renderer.listing(category, &items)?)?;
                }
            }
        },
        Command::Show { item: Some(reference) } => {
            let id = session.resolve_item(&reference)?;
            let item = session
                .store()
                .get(&id)
                .ok_or_else(|| eyre!("No item '{}'", reference))?;
            write!(out, "{}", renderer.item(item)?)?;
        }
        Command::Show { item: None } => {
            let draft = session
                .draft()
                .ok_or_else(|| eyre!("No item is being edited; use show <item>"))?;
            write!(out, "{}", renderer.item(draft.item())?)?;
        }
        Command::Help => write!(out, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Read commands from `input` until EOF or `quit`
///
/// Errors from individual commands are reported and the session continues.
pub fn run<R: BufRead, W: Write>(session: &mut Session, renderer: &Renderer, input: R, out: &mut W, prompt: bool) -> Result<()> {
    if prompt {
        write!(out, "para> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let result = match parse_line(&line) {
            Ok(Some(command)) => execute(session, renderer, command, out),
            Ok(None) => Ok(true),
            Err(e) => Err(e),
        };

        let keep_going = match result {
            Ok(keep_going) => keep_going,
            Err(e) => {
                warn!(line = %line, error = %e, "Command failed");
                writeln!(out, "error: {:#}", e)?;
                true
            }
        };

        if !keep_going {
            debug!("Session ended by quit");
            break;
        }
        if prompt {
            write!(out, "para> ")?;
            out.flush()?;
        }
    }

    if session.draft().is_some() {
        writeln!(out, "warning: unsaved edits discarded")?;
    }
    Ok(())
}
