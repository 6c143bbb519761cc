use authenticator::adapters::{ArboardClipboard, JsonFileStore, TotpCodeSource};
use authenticator::cli::{
    describe_event, handle_version_command, parse_args, render_list, CliCommand, ConsoleCommand,
    RunOptions, HELP, USAGE,
};
use authenticator::coordinator::{
    CoordinatorEvent, CoordinatorMessage, ListChangeKind, ListCoordinator, RowMessageKind,
    RowSender,
};
use authenticator::error::IntentError;
use authenticator::models::{Account, AccountId};
use authenticator::startup::{init_tracing, SessionConfig};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One turn of the console loop.
enum Step {
    Message(CoordinatorMessage),
    Line(String),
    Eof,
}

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        CliCommand::Version => handle_version_command(),
        CliCommand::Usage(message) => {
            eprintln!("{}\n{}", message, USAGE);
            std::process::exit(2);
        }
        CliCommand::Run(options) => options,
    };

    color_eyre::install()?;
    init_tracing(options.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(options))
}

async fn run(options: RunOptions) -> Result<()> {
    let config = options.apply(SessionConfig::from_env());
    let store = Arc::new(match &config.store_path {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default().wrap_err("Failed to locate the account store")?,
    });
    info!(
        path = %store.path().display(),
        algorithm = %config.totp_algorithm,
        "Using account store"
    );

    let codes = TotpCodeSource::new().with_algorithm(config.totp_algorithm);
    let (mut coordinator, mut events) = ListCoordinator::new(
        store.clone(),
        Arc::new(codes),
        Arc::new(ArboardClipboard::new()),
        config,
    );
    let rows = coordinator.row_sender();

    coordinator
        .start()
        .await
        .wrap_err("Failed to load accounts")?;
    flush_events(&mut events, &coordinator)?;
    println!("{}", render_list(coordinator.visible(), coordinator.in_edit_mode()));

    let mut lines = spawn_stdin_reader();
    loop {
        let step = tokio::select! {
            message = coordinator.next_message() => match message {
                Some(message) => Step::Message(message),
                None => Step::Eof,
            },
            line = lines.recv() => match line {
                Some(line) => Step::Line(line),
                None => Step::Eof,
            },
        };

        match step {
            Step::Message(message) => coordinator.handle_message(message).await,
            Step::Line(line) => {
                let keep_going = run_command(&line, &mut coordinator, &rows, &store).await?;
                if !keep_going {
                    break;
                }
            }
            Step::Eof => break,
        }
        flush_events(&mut events, &coordinator)?;
    }

    Ok(())
}

/// Execute one console line. Returns `false` on quit.
async fn run_command(
    line: &str,
    coordinator: &mut ListCoordinator,
    rows: &RowSender,
    store: &JsonFileStore,
) -> Result<bool> {
    let command = match ConsoleCommand::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(true),
        Err(e) => {
            println!("! {}", e);
            return Ok(true);
        }
    };

    let outcome: std::result::Result<(), IntentError> = match command {
        ConsoleCommand::List => {
            println!("{}", render_list(coordinator.visible(), coordinator.in_edit_mode()));
            Ok(())
        }
        ConsoleCommand::Add {
            service,
            username,
            secret,
        } => {
            add_account(coordinator, store, Account::new(service, username, secret)).await;
            Ok(())
        }
        ConsoleCommand::Delete(row) => {
            send_to_row(coordinator, rows, row, RowMessageKind::DeleteRequested)
        }
        ConsoleCommand::Confirm => coordinator.confirm_delete(),
        ConsoleCommand::Cancel => {
            if coordinator.cancel_delete() {
                println!("Kept.");
            }
            Ok(())
        }
        ConsoleCommand::Undo => coordinator.undo(),
        ConsoleCommand::Move { from, to } => coordinator.user_move(from, to),
        ConsoleCommand::Rename { row, update } => {
            send_to_row(coordinator, rows, row, RowMessageKind::Modified(update))
        }
        ConsoleCommand::Copy(row) => {
            send_to_row(coordinator, rows, row, RowMessageKind::CopyPerformed)
        }
        ConsoleCommand::Edit(active) => coordinator.set_edit_mode(active),
        ConsoleCommand::Sync => coordinator.trigger_sync(),
        ConsoleCommand::Help => {
            println!("{}", HELP);
            Ok(())
        }
        ConsoleCommand::Quit => return Ok(false),
    };

    if let Err(e) = outcome {
        println!("! {}", e);
    }
    Ok(true)
}

/// Write a new account to the store and reload the list.
///
/// Refused while the list has unsaved or undoable work; store failures are
/// reported like any other rejected command.
async fn add_account(coordinator: &mut ListCoordinator, store: &JsonFileStore, account: Account) {
    if let Err(e) = coordinator.ensure_reloadable() {
        println!("! {}", e);
        return;
    }
    let service = account.service.clone();
    if let Err(e) = store.insert(account) {
        warn!(error = %e, "Failed to add account");
        println!("! could not add {}: {}", service, e);
        return;
    }
    if let Err(e) = coordinator.load().await {
        warn!(error = %e, "Reload after adding an account failed");
        println!("! added {}, but reloading failed: {}", service, e);
    }
}

/// Route a row command through the row channel, like a tap on the row.
fn send_to_row(
    coordinator: &ListCoordinator,
    rows: &RowSender,
    row: usize,
    kind: RowMessageKind,
) -> std::result::Result<(), IntentError> {
    let list = coordinator.visible();
    let id: AccountId = list
        .get(row)
        .map(|view| view.id().clone())
        .ok_or(IntentError::IndexOutOfRange {
            index: row,
            len: list.len(),
        })?;
    rows.send(id, kind);
    Ok(())
}

fn flush_events(
    events: &mut mpsc::UnboundedReceiver<CoordinatorEvent>,
    coordinator: &ListCoordinator,
) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        if let CoordinatorEvent::Fatal { detail } = &event {
            return Err(eyre!("Account list closed: {}", detail));
        }
        if let Some(text) = describe_event(&event, coordinator.visible()) {
            println!("{}", text);
        }
        let reloaded = matches!(
            &event,
            CoordinatorEvent::ListChanged(change)
                if matches!(change.kind, ListChangeKind::Reset { .. })
        );
        if reloaded {
            println!("{}", render_list(coordinator.visible(), coordinator.in_edit_mode()));
        }
    }
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
