/// Tests for the interactive shell's line parser — one function, no I/O.
use task_cli::shell::{parse_line, ShellCommand};
use task_cli::tasks::Status;

#[test]
fn add_with_quoted_description() {
    assert_eq!(
        parse_line(r#"task-cli add "buy groceries""#),
        Some(ShellCommand::Add {
            description: "buy groceries".to_string()
        })
    );
}

#[test]
fn add_without_description_is_invalid() {
    assert_eq!(parse_line("task-cli add"), None);
    // An unquoted description does not match the line grammar either.
    assert_eq!(parse_line("task-cli add buy groceries"), None);
}

#[test]
fn update_takes_id_and_description() {
    assert_eq!(
        parse_line(r#"task-cli update 3 "buy groceries and cook dinner""#),
        Some(ShellCommand::Update {
            id: 3,
            description: "buy groceries and cook dinner".to_string()
        })
    );
    assert_eq!(parse_line(r#"task-cli update "no id""#), None);
}

#[test]
fn delete_and_mark_commands_take_an_id() {
    assert_eq!(
        parse_line("task-cli delete 12"),
        Some(ShellCommand::Delete { id: 12 })
    );
    assert_eq!(
        parse_line("task-cli mark-in-progress 1"),
        Some(ShellCommand::MarkInProgress { id: 1 })
    );
    assert_eq!(
        parse_line("task-cli mark-done 2"),
        Some(ShellCommand::MarkDone { id: 2 })
    );
    assert_eq!(parse_line("task-cli mark-done"), None);
}

#[test]
fn list_with_and_without_status() {
    assert_eq!(
        parse_line("task-cli list"),
        Some(ShellCommand::List { status: None })
    );
    assert_eq!(
        parse_line("task-cli list done"),
        Some(ShellCommand::List {
            status: Some(Status::Done)
        })
    );
}

#[test]
fn list_status_accepts_hyphen_and_underscore() {
    assert_eq!(
        parse_line("task-cli list in-progress"),
        Some(ShellCommand::List {
            status: Some(Status::InProgress)
        })
    );
    assert_eq!(
        parse_line("task-cli list in_progress"),
        Some(ShellCommand::List {
            status: Some(Status::InProgress)
        })
    );
    assert_eq!(parse_line("task-cli list soon"), None);
}

#[test]
fn unknown_action_is_invalid() {
    assert_eq!(parse_line("task-cli frobnicate 1"), None);
    assert_eq!(parse_line("frobnicate"), None);
    assert_eq!(parse_line(""), None);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(
        parse_line("  task-cli delete 5  "),
        Some(ShellCommand::Delete { id: 5 })
    );
}
