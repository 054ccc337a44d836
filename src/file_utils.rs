use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Suffix of files written by the `write` command
pub const OUTPUT_SUFFIX: &str = "imsc.xml";

// @enum: Input kinds the command line accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Srt,
    Json,
    Ttml,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path `<stem>.imsc.xml` next to the input or in output_dir
    pub fn generate_output_path<P1: AsRef<Path>>(input_file: P1, output_dir: Option<&Path>) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(OUTPUT_SUFFIX);

        match output_dir {
            Some(dir) => dir.join(output_filename),
            None => input_file.with_file_name(output_filename),
        }
    }

    /// Find files with any of the given extensions in a directory tree
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            let matches = path.is_file()
                && path.extension().is_some_and(|ext| {
                    let ext = ext.to_string_lossy();
                    extensions
                        .iter()
                        .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
                });
            if matches {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify an input file by extension, falling back to its content
    pub fn detect_input_kind<P: AsRef<Path>>(path: P) -> Result<InputKind> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "srt" => return Ok(InputKind::Srt),
            "json" => return Ok(InputKind::Json),
            "xml" | "ttml" | "dfxp" => return Ok(InputKind::Ttml),
            _ => {}
        }

        let content = Self::read_to_string(path)?;
        let head = content.trim_start_matches('\u{feff}').trim_start();
        if head.starts_with('<') {
            Ok(InputKind::Ttml)
        } else if head.starts_with('{') {
            Ok(InputKind::Json)
        } else if content.contains("-->") {
            Ok(InputKind::Srt)
        } else {
            Err(anyhow!("Unrecognized input format: {:?}", path))
        }
    }
}
