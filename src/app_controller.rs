use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, InputKind};
use crate::imsc::{Imsc10, FORMAT_NAME};
use crate::language_utils;
use crate::srt;
use crate::subtitle::{Paragraph, Subtitle};

// @module: Application controller for file conversions

/// Extensions picked up when converting a directory
const INPUT_EXTENSIONS: [&str; 2] = ["srt", "json"];

/// Drives conversions between files and IMSC documents
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Format used for reading and writing
    format: Imsc10,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let format = Imsc10::new(config.imsc.clone());
        Ok(Self { config, format })
    }

    /// Load a subtitle from an SRT file, a JSON paragraph list or an IMSC document
    pub fn load_input(&self, input_file: &Path) -> Result<Subtitle> {
        let content = FileManager::read_to_string(input_file)?;

        match FileManager::detect_input_kind(input_file)? {
            InputKind::Srt => srt::parse_srt_string(&content)
                .with_context(|| format!("Failed to parse SRT file: {:?}", input_file)),
            InputKind::Json => parse_json_subtitle(&content)
                .with_context(|| format!("Failed to parse JSON file: {:?}", input_file)),
            InputKind::Ttml => Ok(self.read_document(input_file)?),
        }
    }

    /// Load an IMSC document, keeping it as header for a later write
    pub fn read_document(&self, path: &Path) -> std::result::Result<Subtitle, AppError> {
        let content = std::fs::read_to_string(path)?;
        let file_name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();

        Ok(self.format.load_subtitle(&content, &file_name)?)
    }

    /// Serialize a subtitle to IMSC text
    pub fn render(&self, subtitle: &Subtitle, title: &str) -> std::result::Result<String, AppError> {
        Ok(self.format.to_text(subtitle, title)?)
    }

    /// Convert one file. Returns the written path, or `None` when the
    /// output exists and overwriting is off.
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: Option<&Path>,
        title: Option<&str>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists, skipping: {:?}", output_path);
            return Ok(None);
        }

        let subtitle = self.load_input(input_file)?;
        let title = title.map(str::to_string).unwrap_or_else(|| {
            input_file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        });

        let xml = self
            .render(&subtitle, &title)
            .with_context(|| format!("Failed to convert {:?}", input_file))?;
        FileManager::write_to_file(&output_path, &xml)?;

        info!(
            "Wrote {} paragraphs as {} ({}) to {:?}",
            subtitle.paragraphs.len(),
            FORMAT_NAME,
            self.language_label(),
            output_path
        );
        Ok(Some(output_path))
    }

    /// Convert every SRT and JSON file below `input_dir`. Returns the
    /// number of files written.
    pub fn run_folder(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        title: Option<&str>,
        force_overwrite: bool,
    ) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(input_dir, &INPUT_EXTENSIONS)?;
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(0);
        }

        let mut written = 0;
        for file in &files {
            match self.run(file, output_dir, title, force_overwrite) {
                Ok(Some(_)) => written += 1,
                Ok(None) => {}
                Err(e) => warn!("Failed to convert {:?}: {:#}", file, e),
            }
        }

        info!("Converted {} of {} files in {:?}", written, files.len(), input_dir);
        Ok(written)
    }

    /// Lines printed by the `read` command: SRT blocks followed by the
    /// paragraph summary
    pub fn describe(&self, subtitle: &Subtitle) -> String {
        let mut out = String::new();
        for (i, paragraph) in subtitle.paragraphs.iter().enumerate() {
            out.push_str(&format!("{}\n{}", i + 1, paragraph));
            out.push_str(&format!("[{}]\n\n", self.format.extra_summary(paragraph)));
        }
        out
    }

    fn language_label(&self) -> String {
        let code = &self.config.imsc.default_language;
        match language_utils::get_language_name(code) {
            Ok(name) => format!("{} ({})", name, code),
            Err(e) => {
                debug!("No display name for language '{}': {}", code, e);
                code.clone()
            }
        }
    }
}

/// Accepts either a full subtitle object or a bare paragraph list
fn parse_json_subtitle(content: &str) -> Result<Subtitle> {
    if let Ok(subtitle) = serde_json::from_str::<Subtitle>(content) {
        return Ok(subtitle);
    }

    let paragraphs: Vec<Paragraph> = serde_json::from_str(content)?;
    Ok(Subtitle::new(paragraphs))
}
