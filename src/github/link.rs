//! Link-relation pagination following.
//!
//! GitHub communicates pagination through a `Link` header of
//! comma-separated relations: `<URL>; rel="next", <URL>; rel="last"`.
//! The absence of a `next` relation is the normal last-page signal.

/// Extracts the URL of the `next` relation from a Link header value.
///
/// Returns None for an absent header, a malformed header, or a header
/// without a `next` relation. Never fails.
pub fn next_page_url(header: Option<&str>) -> Option<String> {
    let header = header?;

    for relation in header.split(',') {
        let mut segments = relation.split(';');

        let url = match segments.next() {
            Some(url) => url.trim(),
            None => continue,
        };
        if !url.starts_with('<') || !url.ends_with('>') {
            continue;
        }

        let is_next = segments.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if is_next {
            return Some(url[1..url.len() - 1].to_string());
        }
    }

    None
}
