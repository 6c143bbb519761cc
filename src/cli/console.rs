//! Line-oriented console front end.
//!
//! Parses typed commands and renders the list and coordinator events as
//! plain text. Row numbers are 1-based on the console and 0-based
//! everywhere else.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::coordinator::{CoordinatorEvent, GateState, ListChangeKind, VisibleList};
use crate::models::AccountUpdate;

pub const HELP: &str = "\
commands:
  list                          show accounts
  add SERVICE USERNAME SECRET   add an account (secret in base64)
  delete N                      delete row N (asks for confirmation)
  confirm | cancel              answer a delete confirmation
  undo                          restore the last deleted account
  move FROM TO                  move a row (edit mode)
  rename N SERVICE [USERNAME]   edit a row (edit mode)
  copy N                        copy the code of row N
  edit on|off                   toggle edit mode
  sync                          synchronize now
  help                          show this help
  quit                          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Add {
        service: String,
        username: String,
        secret: Vec<u8>,
    },
    Delete(usize),
    Confirm,
    Cancel,
    Undo,
    Move { from: usize, to: usize },
    Rename { row: usize, update: AccountUpdate },
    Copy(usize),
    Edit(bool),
    Sync,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a row number")]
    BadRow(String),

    #[error("secret is not valid base64")]
    BadSecret,
}

impl ConsoleCommand {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, rest)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (verb, rest) {
            ("list" | "ls", []) => ConsoleCommand::List,
            ("add", [service, username, secret]) => ConsoleCommand::Add {
                service: service.to_string(),
                username: username.to_string(),
                secret: BASE64.decode(secret).map_err(|_| ConsoleError::BadSecret)?,
            },
            ("add", _) => return Err(ConsoleError::Usage("add SERVICE USERNAME SECRET")),
            ("delete" | "rm", [row]) => ConsoleCommand::Delete(parse_row(row)?),
            ("delete" | "rm", _) => return Err(ConsoleError::Usage("delete N")),
            ("confirm" | "y", []) => ConsoleCommand::Confirm,
            ("cancel" | "n", []) => ConsoleCommand::Cancel,
            ("undo", []) => ConsoleCommand::Undo,
            ("move" | "mv", [from, to]) => ConsoleCommand::Move {
                from: parse_row(from)?,
                to: parse_row(to)?,
            },
            ("move" | "mv", _) => return Err(ConsoleError::Usage("move FROM TO")),
            ("rename", [row, service]) => ConsoleCommand::Rename {
                row: parse_row(row)?,
                update: AccountUpdate::service(*service),
            },
            ("rename", [row, service, username]) => ConsoleCommand::Rename {
                row: parse_row(row)?,
                update: AccountUpdate::service(*service).with_username(*username),
            },
            ("rename", _) => return Err(ConsoleError::Usage("rename N SERVICE [USERNAME]")),
            ("copy" | "cp", [row]) => ConsoleCommand::Copy(parse_row(row)?),
            ("copy" | "cp", _) => return Err(ConsoleError::Usage("copy N")),
            ("edit", ["on"]) => ConsoleCommand::Edit(true),
            ("edit", ["off"]) => ConsoleCommand::Edit(false),
            ("edit", _) => return Err(ConsoleError::Usage("edit on|off")),
            ("sync", []) => ConsoleCommand::Sync,
            ("help" | "?", _) => ConsoleCommand::Help,
            ("quit" | "exit" | "q", _) => ConsoleCommand::Quit,
            _ => return Err(ConsoleError::Unknown(line.trim().to_string())),
        };
        Ok(Some(command))
    }
}

/// 1-based row number to list index.
fn parse_row(word: &str) -> Result<usize, ConsoleError> {
    match word.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row - 1),
        _ => Err(ConsoleError::BadRow(word.to_string())),
    }
}

pub fn render_list(list: &VisibleList, in_edit_mode: bool) -> String {
    if list.is_empty() {
        return "No accounts. Add one with 'add SERVICE USERNAME SECRET'.".to_string();
    }
    let mut out = String::new();
    if in_edit_mode {
        out.push_str("[edit mode]\n");
    }
    for (index, row) in list.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({})\n",
            index + 1,
            row.account.service,
            row.account.username
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

/// One-line description of an event, if it is worth printing.
pub fn describe_event(event: &CoordinatorEvent, list: &VisibleList) -> Option<String> {
    match event {
        CoordinatorEvent::ListChanged(change) => match change.kind {
            ListChangeKind::Reset { len } => Some(format!("{len} account(s) loaded")),
            _ => None,
        },
        CoordinatorEvent::DeleteConfirmationRequested { account_id } => {
            let name = list
                .find(account_id)
                .map(|row| row.account.service.clone())
                .unwrap_or_else(|| account_id.to_string());
            Some(format!("Delete {name}? Type 'confirm' or 'cancel'."))
        }
        CoordinatorEvent::CodeCopied { .. } => Some("Code copied to the clipboard.".to_string()),
        CoordinatorEvent::Modified { .. } => Some("Saved.".to_string()),
        CoordinatorEvent::Removed { index, .. } => {
            Some(format!("Removed row {}. Type 'undo' to restore it.", index + 1))
        }
        CoordinatorEvent::UndoWindowOpened { .. } | CoordinatorEvent::UndoWindowClosed => None,
        CoordinatorEvent::EditModeChanged(true) => Some("Edit mode on.".to_string()),
        CoordinatorEvent::EditModeChanged(false) => Some("Edit mode off.".to_string()),
        CoordinatorEvent::GateChanged(GateState::Active) => Some("Synchronizing...".to_string()),
        CoordinatorEvent::GateChanged(GateState::Idle) => {
            Some("Synchronization finished.".to_string())
        }
        CoordinatorEvent::Notice(notice) => Some(format!("! {notice}")),
        CoordinatorEvent::IntentRejected(err) => Some(format!("! {err}")),
        CoordinatorEvent::Fatal { detail } => Some(format!("fatal: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{ChangeOrigin, Notice};
    use crate::models::{Account, AccountView};

    fn list() -> VisibleList {
        let mut list = VisibleList::new();
        list.reset(vec![
            AccountView::new(Account::with_id("a", "GitHub", "alice", vec![1]), false),
            AccountView::new(Account::with_id("b", "Mail", "bob", vec![2]), false),
        ]);
        list
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse("  "), Ok(None));
        assert_eq!(ConsoleCommand::parse("delete 2"), Ok(Some(ConsoleCommand::Delete(1))));
        assert_eq!(
            ConsoleCommand::parse("move 3 1"),
            Ok(Some(ConsoleCommand::Move { from: 2, to: 0 }))
        );
        assert_eq!(ConsoleCommand::parse("edit on"), Ok(Some(ConsoleCommand::Edit(true))));
        assert_eq!(
            ConsoleCommand::parse("rename 1 Work carol"),
            Ok(Some(ConsoleCommand::Rename {
                row: 0,
                update: AccountUpdate::service("Work").with_username("carol"),
            }))
        );
    }

    #[test]
    fn test_parse_add_decodes_secret() {
        assert_eq!(
            ConsoleCommand::parse("add GitHub alice AQID"),
            Ok(Some(ConsoleCommand::Add {
                service: "GitHub".to_string(),
                username: "alice".to_string(),
                secret: vec![1, 2, 3],
            }))
        );
        assert_eq!(
            ConsoleCommand::parse("add GitHub alice !!!"),
            Err(ConsoleError::BadSecret)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ConsoleCommand::parse("delete 0"),
            Err(ConsoleError::BadRow("0".to_string()))
        );
        assert_eq!(ConsoleCommand::parse("copy"), Err(ConsoleError::Usage("copy N")));
        assert!(matches!(
            ConsoleCommand::parse("frobnicate"),
            Err(ConsoleError::Unknown(_))
        ));
    }

    #[test]
    fn test_render_list() {
        assert_eq!(
            render_list(&list(), false),
            "  1. GitHub (alice)\n  2. Mail (bob)"
        );
        assert!(render_list(&VisibleList::new(), false).starts_with("No accounts"));
        assert!(render_list(&list(), true).starts_with("[edit mode]"));
    }

    #[test]
    fn test_describe_event() {
        let list = list();
        let confirm = CoordinatorEvent::DeleteConfirmationRequested {
            account_id: "b".into(),
        };
        assert_eq!(
            describe_event(&confirm, &list).as_deref(),
            Some("Delete Mail? Type 'confirm' or 'cancel'.")
        );

        let notice = CoordinatorEvent::Notice(Notice::ChangesDetectedRedoMove);
        assert!(describe_event(&notice, &list).unwrap().starts_with("! "));

        let mut scratch = VisibleList::new();
        let change = scratch.insert(
            0,
            AccountView::new(Account::with_id("c", "C", "c", vec![3]), false),
            ChangeOrigin::User,
        );
        assert!(describe_event(&CoordinatorEvent::ListChanged(change), &list).is_none());
    }
}
