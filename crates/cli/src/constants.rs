use std::sync::LazyLock;

use regex::Regex;

pub const GOGOANIME_BASE_URL: &str = "https://ww1.gogoanime2.org";

pub static UNSAFE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1f]+"#).expect("filename regex must compile")
});
