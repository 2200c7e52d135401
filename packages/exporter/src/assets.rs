//! Static files copied verbatim into every site.

/// A file embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct StaticAsset {
    /// Path relative to the site root.
    pub path: &'static str,
    pub contents: &'static str,
}

/// Frameset, stylesheet and the element list filter script.
pub const STATIC_ASSETS: [StaticAsset; 3] = [
    StaticAsset {
        path: "index.html",
        contents: include_str!("../assets/index.html"),
    },
    StaticAsset {
        path: "stylesheet.css",
        contents: include_str!("../assets/stylesheet.css"),
    },
    StaticAsset {
        path: "resources/classFilter.js",
        contents: include_str!("../assets/resources/classFilter.js"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frameset_names_match_page_targets() {
        let index = STATIC_ASSETS[0].contents;
        assert!(index.contains(r#"name="packageFrame""#));
        assert!(index.contains(r#"name="classFrame""#));
        assert!(index.contains(crate::config::OVERVIEW_FRAME));
        assert!(index.contains(crate::config::ALLCLASSES_FRAME));
    }

    #[test]
    fn test_filter_script_has_no_jquery() {
        let script = STATIC_ASSETS[2].contents;
        assert!(script.contains("class-filter"));
        assert!(!script.contains("$("));
    }
}
