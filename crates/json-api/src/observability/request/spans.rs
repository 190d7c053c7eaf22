//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace UUID path segments with `{uuid}` so labels stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
