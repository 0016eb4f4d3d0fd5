use crate::types::{EntryKind, EntryRecord, ScanResult, Tree};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

#[derive(Debug, PartialEq, Eq)]
pub struct TreeLine {
    pub prefix: String,
    pub name: String,
    pub is_dir: bool,
}

/// Project facts about a single path, as shown by `--info`.
#[derive(Debug)]
pub struct PathInfo {
    pub path: String,
    pub parent: Option<String>,
    pub base_name: Result<String, String>,
    pub library: Option<String>,
    pub project: Option<String>,
    pub level1_id: String,
    pub amwiki_root: Option<String>,
}

#[must_use]
pub fn tree_lines(tree: &Tree) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    push_lines(tree, "", &mut lines);
    lines
}

fn push_lines(tree: &Tree, indent: &str, lines: &mut Vec<TreeLine>) {
    let count = tree.len();
    for (i, (name, entry)) in tree.iter().enumerate() {
        let last = i + 1 == count;
        lines.push(TreeLine {
            prefix: format!("{indent}{}", if last { "└── " } else { "├── " }),
            name: name.clone(),
            is_dir: !entry.is_file(),
        });
        if let Some(children) = entry.children() {
            let child_indent = format!("{indent}{}", if last { "    " } else { "│   " });
            push_lines(children, &child_indent, lines);
        }
    }
}

pub fn print_tree(root: &str, tree: &Tree) {
    println!("{}", root.bold());
    for line in tree_lines(tree) {
        if line.is_dir {
            println!("{}{}", line.prefix, format!("{}/", line.name).cyan());
        } else {
            println!("{}{}", line.prefix, line.name);
        }
    }
}

#[must_use]
pub fn count_kinds(entries: &[EntryRecord]) -> (usize, usize) {
    let folders = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Folder)
        .count();
    (folders, entries.len() - folders)
}

pub fn print_entries(entries: &[EntryRecord]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Depth", "Type", "Name", "Path"]);

    for entry in entries {
        let (kind, color) = match entry.kind {
            EntryKind::Folder => ("folder", Color::Cyan),
            EntryKind::File => ("file", Color::White),
        };
        table.add_row(vec![
            Cell::new(entry.depth),
            Cell::new(kind).fg(color),
            Cell::new(&entry.name),
            Cell::new(&entry.path),
        ]);
    }

    println!("\n{table}");
}

pub fn print_files(files: &[String]) {
    if files.is_empty() {
        println!("No files found.");
        return;
    }
    for f in files {
        println!("  - {f}");
    }
}

pub fn to_json(result: &ScanResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn found_or_missing(value: Option<&str>) -> Cell {
    match value {
        Some(v) if !v.is_empty() => Cell::new(v).fg(Color::Green),
        _ => Cell::new("-").fg(Color::Yellow),
    }
}

pub fn print_info(info: &PathInfo) {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Property", "Value"]);

    table.add_row(vec![Cell::new("Path"), Cell::new(&info.path)]);
    table.add_row(vec![
        Cell::new("Parent folder"),
        found_or_missing(info.parent.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Base name"),
        match &info.base_name {
            Ok(name) => Cell::new(name),
            Err(e) => Cell::new(e).fg(Color::Red),
        },
    ]);
    table.add_row(vec![
        Cell::new("Library folder"),
        found_or_missing(info.library.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Project folder"),
        found_or_missing(info.project.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Level-1 id"),
        found_or_missing(Some(info.level1_id.as_str())),
    ]);
    table.add_row(vec![
        Cell::new("amWiki project"),
        match &info.amwiki_root {
            Some(root) => Cell::new(format!("yes ({root})")).fg(Color::Green),
            None => Cell::new("no").fg(Color::Red),
        },
    ]);

    println!("{table}");
}
