use url::Url;

/// Pulls the page index out of a continuation URL, e.g.
/// `https://host/api/character?page=3&count=5` yields 3.
pub(crate) fn parse_page_param(next: Option<&str>) -> Option<u32> {
    let value = next?.trim();
    if value.is_empty() {
        return None;
    }
    let url = Url::parse(value).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, page)| page.parse::<u32>().ok())
}
