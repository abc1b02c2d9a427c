//! Line commands understood by the terminal front end.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use client_core::{Board, DraftEdit, InMemoryPointsApi, Renderer};
use shared::{
    domain::{PointId, PointType},
    protocol::{FilterKind, SortKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftTarget {
    Point(PointId),
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Sort(SortKind),
    Filter(FilterKind),
    Edit(PointId),
    Cancel(PointId),
    Set { target: DraftTarget, edit: DraftEdit },
    Save(PointId),
    Delete(PointId),
    Favorite(PointId),
    New,
    Submit,
    Close,
    FailNext,
    Hide,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                               print the board
  sort <day|time|price>              change the sort
  filter <everything|future|past>    change the filter
  edit <id> | cancel <id>            open or close a point's form
  set <id|new> type <type>           change the draft's type
  set <id|new> destination <name>
  set <id|new> price <amount>
  set <id|new> dates <from> <to>     RFC 3339 timestamps
  set <id|new> offer <title>         toggle an offer
  save <id> | delete <id> | fav <id>
  new | submit | close               creation form
  fail-next                          reject the next persistence call
  hide | show
  quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb {
            "list" | "ls" => Command::List,
            "sort" => Command::Sort(single(&rest)?.parse()?),
            "filter" => Command::Filter(single(&rest)?.parse()?),
            "edit" => Command::Edit(point_id(single(&rest)?)?),
            "cancel" => Command::Cancel(point_id(single(&rest)?)?),
            "save" => Command::Save(point_id(single(&rest)?)?),
            "delete" | "rm" => Command::Delete(point_id(single(&rest)?)?),
            "fav" => Command::Favorite(point_id(single(&rest)?)?),
            "new" => Command::New,
            "submit" => Command::Submit,
            "close" => Command::Close,
            "fail-next" => Command::FailNext,
            "hide" => Command::Hide,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "set" => parse_set(&rest)?,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(command)
    }
}

fn single<'a>(args: &[&'a str]) -> Result<&'a str> {
    match args {
        [value] => Ok(*value),
        _ => Err(anyhow!("expected exactly one argument")),
    }
}

fn point_id(raw: &str) -> Result<PointId> {
    raw.parse::<i64>()
        .map(PointId)
        .with_context(|| format!("invalid point id '{raw}'"))
}

fn parse_set(args: &[&str]) -> Result<Command> {
    let [target, field, values @ ..] = args else {
        bail!("usage: set <id|new> <field> <value>");
    };
    let target = match *target {
        "new" => DraftTarget::New,
        raw => DraftTarget::Point(point_id(raw)?),
    };
    let joined = values.join(" ");
    let edit = match *field {
        "type" => DraftEdit::SetType(
            PointType::from_label(&joined).ok_or_else(|| anyhow!("unknown type '{joined}'"))?,
        ),
        "destination" | "dest" => DraftEdit::SetDestination(joined),
        "price" => DraftEdit::SetBasePrice(
            joined
                .parse()
                .with_context(|| format!("invalid price '{joined}'"))?,
        ),
        "dates" => {
            let [from, to] = values else {
                bail!("usage: set <id|new> dates <from> <to>");
            };
            DraftEdit::SetDates {
                from: timestamp(from)?,
                to: timestamp(to)?,
            }
        }
        "offer" => DraftEdit::ToggleOffer { title: joined },
        other => bail!("unknown field '{other}'"),
    };
    Ok(Command::Set { target, edit })
}

fn timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp '{raw}'"))
}

/// Applies one command. Returns `false` when the session should end.
pub fn execute<R: Renderer>(
    board: &mut Board<R>,
    api: &InMemoryPointsApi,
    command: Command,
) -> Result<bool> {
    match command {
        Command::List | Command::Help => {}
        Command::Sort(sort) => board.change_sort(sort)?,
        Command::Filter(filter) => board.set_filter(filter)?,
        Command::Edit(id) => board.edit_point(id)?,
        Command::Cancel(id) => board.cancel_edit(id)?,
        Command::Set {
            target: DraftTarget::Point(id),
            edit,
        } => board.edit_draft(id, edit)?,
        Command::Set {
            target: DraftTarget::New,
            edit,
        } => board.edit_creation(edit)?,
        Command::Save(id) => board.save_point(id)?,
        Command::Delete(id) => board.delete_point(id)?,
        Command::Favorite(id) => board.toggle_favorite(id)?,
        Command::New => board.begin_create()?,
        Command::Submit => board.submit_creation()?,
        Command::Close => board.cancel_creation()?,
        Command::FailNext => api.fail_next(1),
        Command::Hide => board.hide(),
        Command::Show => board.show(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
