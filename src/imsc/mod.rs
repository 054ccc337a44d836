/*!
 * IMSC 1.0 (Text Profile) writer and reader.
 *
 * `Imsc10` layers the IMSC profile on a generic TTML reader:
 * - writing builds a complete document from a subtitle, reusing a loaded
 *   header when there is one
 * - reading delegates to the TTML reader and restores forced display
 */

pub mod effects;
pub mod header;
pub mod loader;
pub mod markup;
pub mod paragraph;
pub mod regions;

use log::{debug, info};

use crate::app_config::ImscConfig;
use crate::errors::ImscResult;
use crate::subtitle::{Paragraph, Subtitle};
use crate::ttml::base::{GenericTtml, TtmlBase};
use crate::ttml::dom::XmlDocument;
use crate::ttml::TimeCodeFormat;

use self::header::HeaderCatalog;
use self::paragraph::ParagraphBuilder;

/// Attribute marking a paragraph as always shown
pub const FORCED_DISPLAY_ATTRIBUTE: &str = "itts:forcedDisplay";

/// Display name of the format
pub const FORMAT_NAME: &str = "IMSC 1.0";

/// IMSC 1.0 format on top of a TTML reader
pub struct Imsc10<B: TtmlBase = GenericTtml> {
    config: ImscConfig,
    base: B,
}

impl Imsc10<GenericTtml> {
    pub fn new(config: ImscConfig) -> Self {
        let base = GenericTtml::from_config(&config);
        Imsc10 { config, base }
    }
}

impl<B: TtmlBase> Imsc10<B> {
    pub fn with_base(config: ImscConfig, base: B) -> Self {
        Imsc10 { config, base }
    }

    /// Serializes the subtitle to an IMSC document
    pub fn to_text(&self, subtitle: &Subtitle, title: &str) -> ImscResult<String> {
        let mut document = self.template(subtitle, title)?;
        self.declare_time_base(&mut document);
        let mut catalog = HeaderCatalog::from_document(&document);
        let builder = ParagraphBuilder::new(&self.base, self.config.inject_default_regions);

        for (index, paragraph) in subtitle.paragraphs.iter().enumerate() {
            let element = builder.build(paragraph, &format!("p{}", index), &mut document, &mut catalog);
            header::body_div_mut(&mut document).append_child(element);
        }

        debug!("Built {} paragraphs for '{}'", subtitle.paragraphs.len(), title);
        document.to_xml_string()
    }

    /// Parses an IMSC document. The text is kept as the subtitle header
    /// so a later write reuses its head.
    pub fn load_subtitle(&self, content: &str, file_name: &str) -> ImscResult<Subtitle> {
        let document = header::import_header(content)?;
        let paragraphs = self.base.parse_paragraphs(&document)?;

        let mut subtitle = Subtitle {
            paragraphs,
            header: Some(content.to_string()),
        };
        loader::apply_forced_display(&mut subtitle);

        info!("Loaded {} paragraphs from {}", subtitle.paragraphs.len(), file_name);
        Ok(subtitle)
    }

    /// One-line summary: `<style> / <language> / <forced y|n>`
    pub fn extra_summary(&self, paragraph: &Paragraph) -> String {
        let or_dash = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or("-")
                .to_string()
        };

        format!(
            "{} / {} / {}",
            or_dash(paragraph.style.as_deref()),
            or_dash(paragraph.language.as_deref()),
            if paragraph.forced { "y" } else { "n" }
        )
    }

    /// Frame and tick based times are only meaningful with their rate on
    /// the root
    fn declare_time_base(&self, document: &mut XmlDocument) {
        match self.config.time_code_format {
            TimeCodeFormat::ClockFrames => document
                .root
                .set_attribute("ttp:frameRate", &self.config.frame_rate.to_string()),
            TimeCodeFormat::Ticks => document
                .root
                .set_attribute("ttp:tickRate", &self.config.tick_rate.to_string()),
            _ => {}
        }
    }

    fn template(&self, subtitle: &Subtitle, title: &str) -> ImscResult<XmlDocument> {
        match subtitle.header.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(text) => {
                let mut document = header::import_header(text)?;
                header::prepare_template(&mut document, title)?;
                Ok(document)
            }
            None => Ok(header::generate_default_header(title, &self.config.default_language)),
        }
    }
}
