//! Command line argument parsing.

use clap::Parser;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Directory scanned when the program argument is `all`.
pub const EXAMPLE_DIR: &str = "example";

/// Command line arguments for the stratifier tools
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path of the JSON program, or "all" to process all example files
    #[arg(value_name = "PROGRAM")]
    pub program: String,

    /// Write the precedence graph as DOT to PATH. If PATH is `-` then stdout is used.
    #[arg(long, value_name = "PATH")]
    pub dot: Option<String>,

    /// Wrap the `--dot` output in a standalone HTML viewer page
    #[arg(long, requires = "dot")]
    pub html: bool,
}

impl Args {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn should_process_all(&self) -> bool {
        self.program == "all" || self.program == "--all"
    }

    pub fn program_name(&self) -> String {
        Path::new(&self.program)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown_program".into())
    }

    pub fn dot(&self) -> Option<&str> {
        self.dot.as_deref()
    }

    pub fn html(&self) -> bool {
        self.html
    }
}

/// Get all .json files from `dir`, sorted alphabetically
pub fn get_example_files(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_flags() {
        let args = Args::parse_from(["stratifier", "example/reach.json", "--dot", "-", "--html"]);
        assert_eq!(args.program(), "example/reach.json");
        assert_eq!(args.program_name(), "reach");
        assert_eq!(args.dot(), Some("-"));
        assert!(args.html());
        assert!(!args.should_process_all());
    }

    #[test]
    fn html_requires_dot() {
        assert!(Args::try_parse_from(["stratifier", "p.json", "--html"]).is_err());
    }

    #[test]
    fn all_keyword() {
        assert!(Args::parse_from(["stratifier", "all"]).should_process_all());
    }

    #[test]
    fn example_files_are_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let files = get_example_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
