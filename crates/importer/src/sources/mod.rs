mod http;
mod json_file;
mod static_list;

pub use http::HttpSource;
pub use json_file::JsonFileSource;
pub use static_list::StaticSource;

use crate::traits::CandidateSource;

/// Pick a source for `location`: `http(s)://` URLs are fetched, anything
/// else is read as a path to a JSON export.
pub fn source_from_location(location: &str) -> Box<dyn CandidateSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(JsonFileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_dispatch() {
        assert_eq!(
            source_from_location("https://example.org/applications.json").describe(),
            "url https://example.org/applications.json"
        );
        assert_eq!(
            source_from_location("./test.applications.json").describe(),
            "file ./test.applications.json"
        );
    }
}
