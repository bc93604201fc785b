//! Feed document parsing.

use roxmltree::{Document, Node};

use crate::domain::{FeedTime, StopMessage, StopRecord};

use super::error::ParseError;

/// Parse a feed document into its stop records.
///
/// The document is a `<timetable>` tree of `<s>` stop elements, each with
/// an optional `<ar>` arrival element carrying compact timestamp, platform
/// and line attributes, plus free-text `<m>` message elements. Unknown
/// elements and missing attributes are tolerated; a structurally
/// unexpected document fails as a whole so that a corrupt parse tree never
/// contributes events.
pub fn parse_feed(body: &str) -> Result<Vec<StopRecord>, ParseError> {
    let doc = Document::parse(body).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let root = doc.root_element();
    if !root.has_tag_name("timetable") {
        return Err(ParseError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    root.children()
        .filter(|n| n.has_tag_name("s"))
        .map(parse_stop)
        .collect()
}

fn parse_stop(node: Node) -> Result<StopRecord, ParseError> {
    let stop_id = node
        .attribute("id")
        .ok_or(ParseError::MissingStopId)?
        .to_string();

    let arrival = node.children().find(|n| n.has_tag_name("ar"));

    let planned_arrival = time_attribute(arrival, "pt", &stop_id)?;
    let changed_arrival = time_attribute(arrival, "ct", &stop_id)?;
    let planned_platform = string_attribute(arrival, "pp");
    let changed_platform = string_attribute(arrival, "cp");
    let line_label = string_attribute(arrival, "l");

    // Messages appear both directly under the stop and nested in the
    // arrival/departure elements.
    let messages = node
        .descendants()
        .filter(|n| n.has_tag_name("m"))
        .map(|n| parse_message(n, &stop_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StopRecord {
        stop_id,
        planned_arrival,
        changed_arrival,
        planned_platform,
        changed_platform,
        line_label,
        messages,
    })
}

fn parse_message(node: Node, stop_id: &str) -> Result<StopMessage, ParseError> {
    Ok(StopMessage {
        id: node.attribute("id").map(str::to_string),
        kind: node.attribute("t").map(str::to_string),
        timestamp: time_attribute(Some(node), "ts", stop_id)?,
    })
}

/// Decode an optional compact-timestamp attribute.
///
/// A missing attribute is "no value"; a present but malformed one fails
/// the document.
fn time_attribute(
    node: Option<Node>,
    name: &str,
    stop_id: &str,
) -> Result<Option<FeedTime>, ParseError> {
    match node.and_then(|n| n.attribute(name)) {
        None => Ok(None),
        Some(raw) => FeedTime::parse(raw)
            .map(Some)
            .map_err(|source| ParseError::BadTimestamp {
                stop: stop_id.to_string(),
                value: raw.to_string(),
                source,
            }),
    }
}

fn string_attribute(node: Option<Node>, name: &str) -> Option<String> {
    node.and_then(|n| n.attribute(name)).map(str::to_string)
}
