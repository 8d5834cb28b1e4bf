use machdash::core::log::LogLogic;
use machdash::db::log::{load_entries, ttlog};
use machdash::db::pool::DbPool;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

#[test]
fn test_entries_come_back_in_insertion_order() {
    let pool = DbPool::in_memory().expect("pool");
    ttlog(&pool.conn, "login", "operator", "session opened").expect("log");
    ttlog(&pool.conn, "fetch", "/data/ops.xlsx", "6 operational rows").expect("log");

    let entries = load_entries(&pool.conn).expect("entries");
    let ops: Vec<&str> = entries.iter().map(|e| e.operation.as_str()).collect();
    assert_eq!(ops, vec!["login", "fetch"]);
    assert_eq!(entries[1].target, "/data/ops.xlsx");
}

#[test]
fn test_formatted_lines_show_operation_and_target() {
    let pool = DbPool::in_memory().expect("pool");
    ttlog(&pool.conn, "export", "/tmp/out.csv", "csv export of machine 12").expect("log");

    let lines = LogLogic::format_entries(&load_entries(&pool.conn).expect("entries"));
    assert_eq!(lines.len(), 1);

    let plain = strip_ansi(&lines[0]);
    assert!(plain.starts_with("1: "));
    assert!(plain.contains("export (/tmp/out.csv)"));
    assert!(plain.ends_with("=> csv export of machine 12"));
}

#[test]
fn test_long_messages_wrap() {
    let pool = DbPool::in_memory().expect("pool");
    let long = "word ".repeat(40);
    ttlog(&pool.conn, "fetch_failed", "https://example.invalid/ops.xlsx", long.trim()).expect("log");

    let lines = LogLogic::format_entries(&load_entries(&pool.conn).expect("entries"));
    assert!(lines[0].contains('\n'));
}
