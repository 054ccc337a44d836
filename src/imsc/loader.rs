/*!
 * Post-processing applied after the generic TTML reader has run.
 */

use log::debug;

use crate::imsc::FORCED_DISPLAY_ATTRIBUTE;
use crate::subtitle::Subtitle;

/// Sets each paragraph's forced flag from its `itts:forcedDisplay`
/// effect. Missing or unparseable values mean not forced.
pub fn apply_forced_display(subtitle: &mut Subtitle) {
    let mut forced = 0;
    for paragraph in &mut subtitle.paragraphs {
        paragraph.forced = parse_forced_display(paragraph.get_effect(FORCED_DISPLAY_ATTRIBUTE).as_deref());
        if paragraph.forced {
            forced += 1;
        }
    }
    debug!("{} of {} paragraphs are forced", forced, subtitle.paragraphs.len());
}

/// Boolean parse of the attribute value, case-insensitive and trimmed
fn parse_forced_display(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
