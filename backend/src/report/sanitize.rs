use regex::Regex;
use std::sync::LazyLock;

/// Anything outside printable 7-bit ASCII, including control characters.
static NON_PRINTABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\x20-\x7E]+").expect("non-printable pattern is a valid regex")
});

/// Keeps only printable ASCII; every run of other characters becomes one space.
///
/// Cells go through here after formatting so the PDF never receives glyphs the
/// embedded font may lack.
pub fn sanitize(text: &str) -> String {
    NON_PRINTABLE.replace_all(text, " ").into_owned()
}
