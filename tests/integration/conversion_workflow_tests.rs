/*!
 * Integration tests for file conversions through the controller
 */

use anyhow::Result;

use imsc_convert::file_utils::FileManager;
use imsc_convert::srt;
use imsc_convert::{Config, Controller};
use crate::common;

#[test]
fn test_run_withSrtFile_shouldWriteImscDocument() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = Controller::with_config(Config::default())?;

    let output = controller.run(&input, None, None, false)?.expect("output should be written");

    assert_eq!(output, temp_dir.path().join("movie.imsc.xml"));
    let document = common::parse_output(&FileManager::read_to_string(&output)?);
    assert_eq!(document.root.descendants("title")[0].text_content(), "movie");

    let elements = common::paragraph_elements(&document);
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[2].attribute("region"), Some("topCenter"));
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    common::create_test_file(temp_dir.path(), "movie.imsc.xml", "old")?;
    let controller = Controller::with_config(Config::default())?;

    assert!(controller.run(&input, None, None, false)?.is_none());
    assert_eq!(FileManager::read_to_string(temp_dir.path().join("movie.imsc.xml"))?, "old");

    assert!(controller.run(&input, None, Some("Title"), true)?.is_some());
    assert!(FileManager::read_to_string(temp_dir.path().join("movie.imsc.xml"))?.contains("Title"));
    Ok(())
}

#[test]
fn test_runFolder_withMixedInputs_shouldConvertSrtAndJson() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("out");
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_file(
        temp_dir.path(),
        "b.json",
        r#"[{"start_time_ms": 0, "end_time_ms": 500, "text": "json", "forced": true}]"#,
    )?;
    common::create_test_file(temp_dir.path(), "c.txt", "skip me")?;
    let controller = Controller::with_config(Config::default())?;

    let written = controller.run_folder(temp_dir.path(), Some(&out_dir), None, false)?;

    assert_eq!(written, 2);
    let json_doc = common::parse_output(&FileManager::read_to_string(out_dir.join("b.imsc.xml"))?);
    assert_eq!(
        common::paragraph_elements(&json_doc)[0].attribute("itts:forcedDisplay"),
        Some("true")
    );
    Ok(())
}

#[test]
fn test_readDocument_afterWrite_shouldDescribeParagraphs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = Controller::with_config(Config::default())?;
    let output = controller.run(&input, None, None, false)?.expect("output should be written");

    let subtitle = controller.read_document(&output)?;
    let description = controller.describe(&subtitle);

    assert_eq!(subtitle.paragraphs.len(), 3);
    assert!(subtitle.header.is_some());
    assert!(description.starts_with("1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n[- / - / n]"));
    Ok(())
}

#[test]
fn test_readDocument_exportedAsSrt_shouldMatchSourceEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = Controller::with_config(Config::default())?;
    let output = controller.run(&input, None, None, false)?.expect("output should be written");

    let exported = srt::to_srt_string(&controller.read_document(&output)?);
    let reparsed = srt::parse_srt_string(&exported)?;
    let source = srt::parse_srt_string(&FileManager::read_to_string(&input)?)?;

    assert!(exported.starts_with("1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n\n2\n"));
    assert_eq!(reparsed.paragraphs.len(), source.paragraphs.len());
    for (read, original) in reparsed.paragraphs.iter().zip(&source.paragraphs).take(2) {
        assert_eq!(read.start_time_ms, original.start_time_ms);
        assert_eq!(read.end_time_ms, original.end_time_ms);
        assert_eq!(read.text, original.text);
    }
    Ok(())
}

#[test]
fn test_readDocument_withMissingFile_shouldReturnFileError() {
    let controller = Controller::with_config(Config::default()).unwrap();

    let result = controller.read_document(std::path::Path::new("/nonexistent/doc.xml"));

    assert!(matches!(result, Err(imsc_convert::AppError::File(_))));
}
