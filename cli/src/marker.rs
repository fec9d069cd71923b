/// Opening tool-call marker emitted by the model
pub const HOTELS_OPEN: &str = "[HOTELS]";
/// Closing tool-call marker
pub const HOTELS_CLOSE: &str = "[/HOTELS]";

/// Finds the first well-formed tool-call marker pair and returns the payload
/// strictly between the markers.
///
/// The closing marker must appear after the opening one; a stray closer
/// before the opener, or an opener with no closer, is not a tool call.
pub fn extract_tool_call(text: &str) -> Option<&str> {
    let start = text.find(HOTELS_OPEN)? + HOTELS_OPEN.len();
    let len = text[start..].find(HOTELS_CLOSE)?;
    Some(&text[start..start + len])
}
