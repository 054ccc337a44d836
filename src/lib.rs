/*!
 * # imsc-convert - IMSC 1.0 subtitle writer
 *
 * A Rust library that serializes timed subtitle paragraphs into IMSC 1.0
 * (Text Profile) TTML documents and reads such documents back.
 *
 * ## Features
 *
 * - Default IMSC template or reuse of a previously loaded document head
 * - Inline markup (`<i>`, `<b>`, `<u>`, `<font>`) mapped to styled spans,
 *   with a plain-text fallback for broken markup
 * - Legacy `{\anN}` alignment tags mapped to the nine standard regions
 * - Forced display through `itts:forcedDisplay`
 * - Extra TTML attributes carried in a compact `key=value|...` string
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle`: The paragraph data model
 * - `ttml`: Generic TTML support:
 *   - `ttml::dom`: XML tree built on quick-xml
 *   - `ttml::time`: Time expressions
 *   - `ttml::base`: The generic TTML reader
 * - `imsc`: The IMSC 1.0 profile:
 *   - `imsc::effects`: Effect string codec
 *   - `imsc::markup`: Markup conversion
 *   - `imsc::regions`: Legacy region tags
 *   - `imsc::header`: Document template
 *   - `imsc::paragraph`: `p` element construction
 * - `srt`: SubRip input for the command line tool
 * - `file_utils`: File system operations
 * - `app_controller`: File conversion controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod imsc;
pub mod language_utils;
pub mod srt;
pub mod subtitle;
pub mod ttml;

// Re-export main types for easier usage
pub use app_config::{Config, ImscConfig};
pub use app_controller::Controller;
pub use errors::{AppError, ImscError, ImscResult};
pub use imsc::Imsc10;
pub use subtitle::{Paragraph, Subtitle};
pub use ttml::{GenericTtml, TimeCodeFormat, TtmlBase};
