#![forbid(unsafe_code)]

use std::path::PathBuf;

use tl_core::config::Config;
use tl_core::model::State;
use tl_storage::{FileStore, StoreError};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("tl_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn default_store() -> FileStore {
    FileStore::new(Config::default().normalized())
}

#[test]
fn missing_file_is_created_with_the_skeleton() {
    let dir = temp_dir("missing_file_is_created_with_the_skeleton");
    let path = dir.join("tasks.md");
    let store = default_store();

    let state = store.load(&path).expect("load");
    let statuses: Vec<&str> = state.groups.keys().map(String::as_str).collect();
    assert_eq!(statuses, ["In Progress", "To Do", "Backlog", "Done"]);
    assert!(state.groups.values().all(Vec::is_empty));

    let content = std::fs::read_to_string(&path).expect("file was written");
    assert!(content.starts_with("# Tasks - Tasks\n"));
    assert!(content.contains("## To Do"));
    assert!(content.ends_with('\n'));
}

#[test]
fn markdown_roundtrip_keeps_groups_and_order() {
    let dir = temp_dir("markdown_roundtrip_keeps_groups_and_order");
    let path = dir.join("sprint.md");
    let store = default_store();

    let mut state = store.empty_state();
    state
        .groups
        .get_mut("In Progress")
        .expect("wip group")
        .push("current work".to_string());
    state
        .groups
        .get_mut("To Do")
        .expect("todo group")
        .extend(["first".to_string(), "second".to_string()]);
    state
        .groups
        .insert("Someday".to_string(), vec!["later".to_string()]);

    store.save(&path, &state).expect("save");
    let loaded = store.load(&path).expect("load");

    let statuses: Vec<&str> = loaded.groups.keys().map(String::as_str).collect();
    assert_eq!(
        statuses,
        ["In Progress", "To Do", "Backlog", "Done", "Someday"]
    );
    assert_eq!(loaded.groups["To Do"], ["first", "second"]);
    assert_eq!(loaded.groups["Someday"], ["later"]);
    assert!(loaded.groups["Backlog"].is_empty());
}

#[test]
fn markdown_escapes_multiline_tasks() {
    let dir = temp_dir("markdown_escapes_multiline_tasks");
    let path = dir.join("tasks.md");
    let store = default_store();

    let mut state = store.empty_state();
    state
        .groups
        .get_mut("To Do")
        .expect("todo group")
        .push("line one\nline two".to_string());
    store.save(&path, &state).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.contains("- [ ] line one\\nline two\n"));

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded.groups["To Do"], ["line one\nline two"]);
}

#[test]
fn markdown_checkbox_style_depends_on_group() {
    let dir = temp_dir("markdown_checkbox_style_depends_on_group");
    let path = dir.join("tasks.md");
    let config = Config {
        statuses: vec!["Backlog".to_string(), "Notes".to_string()],
        ..Config::default()
    }
    .normalized();
    let store = FileStore::new(config);

    let mut state = store.empty_state();
    state
        .groups
        .get_mut("To Do")
        .expect("todo group")
        .push("open item".to_string());
    state
        .groups
        .get_mut("Done")
        .expect("done group")
        .push("closed item".to_string());
    state
        .groups
        .get_mut("Notes")
        .expect("notes group")
        .push("remember this".to_string());
    store.save(&path, &state).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.contains("- [ ] open item\n"));
    assert!(content.contains("- [x] closed item\n"));
    assert!(content.contains("\n- remember this\n"));

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded.groups["To Do"], ["open item"]);
    assert_eq!(loaded.groups["Done"], ["closed item"]);
    assert_eq!(loaded.groups["Notes"], ["remember this"]);
}

#[test]
fn markdown_skips_empty_optional_sections() {
    let dir = temp_dir("markdown_skips_empty_optional_sections");
    let path = dir.join("tasks.md");
    let store = default_store();

    let mut state = store.empty_state();
    state.groups.insert("Notes".to_string(), Vec::new());
    state.groups.insert("Scratch".to_string(), Vec::new());
    store.save(&path, &state).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    // Configured statuses keep their headings while empty; optional and
    // unknown sections disappear.
    assert!(content.contains("## Backlog"));
    assert!(!content.contains("## Notes"));
    assert!(!content.contains("## Scratch"));
}

#[test]
fn markdown_lines_before_any_heading_belong_to_todo() {
    let dir = temp_dir("markdown_lines_before_any_heading_belong_to_todo");
    let path = dir.join("tasks.md");
    std::fs::write(&path, "- loose task\n\n## Done\n\n- [x] archived\n").expect("write raw");

    let loaded = default_store().load(&path).expect("load");
    assert_eq!(loaded.groups["To Do"], ["loose task"]);
    assert_eq!(loaded.groups["Done"], ["archived"]);
}

#[test]
fn markdown_blank_heading_does_not_switch_groups() {
    let dir = temp_dir("markdown_blank_heading_does_not_switch_groups");
    let path = dir.join("tasks.md");
    std::fs::write(&path, "## Done\n\n- [x] one\n\n##   \n\n- [ ] two\n").expect("write raw");

    let loaded = default_store().load(&path).expect("load");
    assert_eq!(loaded.groups["Done"], ["one", "two"]);
}

#[test]
fn markdown_unknown_headings_are_preserved_verbatim() {
    let dir = temp_dir("markdown_unknown_headings_are_preserved_verbatim");
    let path = dir.join("tasks.md");
    std::fs::write(&path, "## Grocery List\n\n- [ ] milk\n").expect("write raw");
    let store = default_store();

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded.groups["Grocery List"], ["milk"]);

    store.save(&path, &loaded).expect("save");
    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.contains("## Grocery List"));
}

#[test]
fn markdown_title_uses_start_cased_file_stem() {
    let dir = temp_dir("markdown_title_uses_start_cased_file_stem");
    let path = dir.join("my-next_tasks.md");
    let store = default_store();
    store.save(&path, &store.empty_state()).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.starts_with("# Tasks - My Next Tasks\n"));
}

#[test]
fn json_roundtrip_uses_tab_indentation() {
    let dir = temp_dir("json_roundtrip_uses_tab_indentation");
    let path = dir.join("tasks.json");
    let store = default_store();

    let mut state = store.empty_state();
    state
        .groups
        .get_mut("To Do")
        .expect("todo group")
        .push("write tests".to_string());
    store.save(&path, &state).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.contains("\n\t\"groups\""));

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded, state);
}

#[test]
fn json_empty_file_reads_as_empty_state() {
    let dir = temp_dir("json_empty_file_reads_as_empty_state");
    let path = dir.join("tasks.json");
    std::fs::write(&path, "").expect("write raw");

    let store = default_store();
    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded, store.empty_state());
}

#[test]
fn yaml_roundtrip() {
    let dir = temp_dir("yaml_roundtrip");
    let path = dir.join("tasks.yml");
    let store = default_store();

    let mut state = store.empty_state();
    state
        .groups
        .get_mut("Done")
        .expect("done group")
        .push("shipped: v1".to_string());
    store.save(&path, &state).expect("save");

    let content = std::fs::read_to_string(&path).expect("read raw");
    assert!(content.starts_with("groups:"));

    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded, state);
}

#[test]
fn corrupt_file_degrades_to_the_empty_skeleton() {
    let dir = temp_dir("corrupt_file_degrades_to_the_empty_skeleton");
    let path = dir.join("tasks.json");
    std::fs::write(&path, "{definitely not json").expect("write raw");

    let store = default_store();
    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded, store.empty_state());
}

#[test]
fn unsupported_extension_is_a_hard_error() {
    let dir = temp_dir("unsupported_extension_is_a_hard_error");
    let path = dir.join("tasks.txt");

    let err = default_store().load(&path).expect_err("txt must be rejected");
    match &err {
        StoreError::UnsupportedExtension { extension } => assert_eq!(extension, "txt"),
        other => panic!("expected UnsupportedExtension, got {other:?}"),
    }
    assert!(err.to_string().contains("Use one of: md, json, yml"));
}

#[test]
fn deleted_group_is_dropped_unless_retention_is_on() {
    let dir = temp_dir("deleted_group_is_dropped_unless_retention_is_on");
    let path = dir.join("tasks.json");
    std::fs::write(
        &path,
        r#"{"groups":{"Deleted":["gone"],"To Do":["keep"]}}"#,
    )
    .expect("write raw");

    let loaded = default_store().load(&path).expect("load");
    assert!(!loaded.groups.contains_key("Deleted"));
    assert_eq!(loaded.groups["To Do"], ["keep"]);

    let retaining = FileStore::new(
        Config {
            keep_deleted: true,
            ..Config::default()
        }
        .normalized(),
    );
    let loaded = retaining.load(&path).expect("load");
    assert_eq!(loaded.groups["Deleted"], ["gone"]);
}

#[test]
fn save_creates_parent_directories() {
    let dir = temp_dir("save_creates_parent_directories");
    let path = dir.join("nested").join("deeper").join("tasks.json");
    let store = default_store();

    store.save(&path, &State::default()).expect("save");
    assert!(path.exists());
}
