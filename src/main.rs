mod config;
mod error;
mod folder_manager;
mod fs_access;
mod paths;
mod render;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use config::TreeConfig;
use folder_manager::FolderManager;
use fs_access::FileSystem;
use std::fs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Any path inside an amWiki project (defaults to DEFAULT_PATH from .amwiki_tree, then ".")
    path: Option<String>,

    /// Also print every scanned entry with its depth and containing folder
    #[arg(long, short = 'l')]
    list: bool,

    /// Also print the flat list of file paths
    #[arg(long, short = 'f')]
    files: bool,

    /// Print the scan result as JSON instead of a tree
    #[arg(long, short = 'j')]
    json: bool,

    /// Show library/project information for PATH instead of scanning
    #[arg(long, short = 'i')]
    info: bool,

    /// Delete everything inside DIR except hidden folders
    #[arg(long, value_name = "DIR")]
    clean: Option<String>,

    /// Create DIR along with any missing parent folders
    #[arg(long, value_name = "DIR")]
    create: Option<String>,

    /// Maximum number of parent folders to climb when looking for library/
    #[arg(long)]
    max_ascent: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = TreeConfig::load();
    if let Some(max_ascent) = args.max_ascent {
        config.max_ascent = max_ascent;
    }
    log::debug!("Using config: {config:?}");

    let manager = FolderManager::local(&config);

    if let Some(dir) = &args.clean {
        exit_on_error(manager.clean_folder(dir));
        println!("{} {dir}", "Cleaned".green());
        return;
    }

    if let Some(dir) = &args.create {
        exit_on_error(manager.create_folder(dir));
        println!("{} {dir}", "Ready".green());
        return;
    }

    let raw_path = args
        .path
        .clone()
        .or_else(|| config.default_path.clone())
        .unwrap_or_else(|| ".".to_string());
    let path = absolute_path(&raw_path);

    if args.info {
        render::print_info(&collect_info(&manager, &path));
        return;
    }

    let (root, result) = match manager.library_folder(&path) {
        Some(library) => {
            let result = manager.scan_library(&library);
            (library, result)
        }
        None if fs::metadata(&path).is_ok_and(|m| m.is_dir()) => {
            log::warn!("No library folder found at or above {raw_path}, scanning it as-is");
            let result = manager.scan(&path, 0);
            (path, result)
        }
        None => {
            eprintln!(
                "{}",
                format!("Error: no library folder found at or above '{raw_path}'.").red()
            );
            std::process::exit(1);
        }
    };

    if args.json {
        match render::to_json(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{}", format!("Error: cannot serialize scan result: {e}").red());
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "{}",
        format!(
            "=== Library Tree: {} ===",
            Local::now().format("%Y-%m-%d %H:%M")
        )
        .cyan()
    );
    if result.is_empty() {
        println!("{}", format!("{root} is empty.").yellow());
        return;
    }
    render::print_tree(&root, &result.tree);

    let (folders, files) = render::count_kinds(&result.entries);
    println!(
        "\n{} folders, {} files",
        folders.to_string().green(),
        files.to_string().green()
    );

    if args.list {
        render::print_entries(&result.entries);
    }

    if args.files {
        println!("\n{}", "=== Files ===".cyan());
        render::print_files(&result.files);
    }
}

fn exit_on_error(result: error::Result<()>) {
    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}

/// Relative paths cannot be climbed by the string helpers, so resolve them first.
fn absolute_path(path: &str) -> String {
    match fs::canonicalize(path) {
        Ok(p) => {
            let resolved = paths::normalize_separators(&p.to_string_lossy());
            if fs::metadata(&p).is_ok_and(|m| m.is_dir()) {
                paths::with_trailing_slash(&resolved)
            } else {
                resolved
            }
        }
        Err(e) => {
            log::debug!("Cannot canonicalize {path}: {e}");
            path.to_string()
        }
    }
}

fn collect_info<F: FileSystem>(manager: &FolderManager<F>, path: &str) -> render::PathInfo {
    let library = manager.library_folder(path);

    render::PathInfo {
        path: path.to_string(),
        parent: paths::parent_folder(path),
        base_name: paths::base_name(path).map_err(|e| e.to_string()),
        project: manager.project_folder(path),
        level1_id: manager.level1_id(path, library.as_deref()),
        amwiki_root: manager.is_amwiki(path),
        library,
    }
}
