use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    static ref DEFANGED_DOT: Regex = Regex::new(r"\[[.,]\]").expect("Not possible");
    static ref PORT: Regex = Regex::new(r":\d+").expect("Not possible");
    static ref SCHEME: Regex = Regex::new(r"h[tx]+p://").expect("Not possible");
}

/// Rewrites one line of loosely formatted address text into a bare address.
///
/// The rewrites run in a fixed order:
///
/// 1. `[.]` and `[,]` become `.`
/// 2. `:<digits>` port suffixes are dropped
/// 3. `http://`, `hxxp://`, `htxxp://` and friends are dropped
/// 4. surrounding spaces are trimmed
///
/// Nothing is validated. Text that matches none of the patterns comes back
/// unchanged apart from the trim.
#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Normalizer
    }

    pub fn normalize(&self, line: &str) -> String {
        let out = DEFANGED_DOT.replace_all(line, ".");
        let out = PORT.replace_all(&out, "");
        let out = SCHEME.replace_all(&out, "");
        let out = out.trim_matches(' ').to_owned();
        trace!(raw = line, normalized = %out, "normalized line");
        out
    }
}

/// Shorthand for [`Normalizer::normalize`].
pub fn normalize(line: &str) -> String {
    Normalizer::new().normalize(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn some_tests() {
        assert_eq!("1.2.3.4", normalize("1[.]2[.]3[.]4"));
        assert_eq!("1.2.3.4", normalize("1.2.3.4"));
        assert_eq!("1.2.3.4", normalize("1[,]2[,]3[.]4"));
        assert_eq!("10.0.0.1", normalize("10.0.0.1:8080"));
        assert_eq!("10.0.0.1", normalize("hxxp://10.0.0.1"));
        assert_eq!("10.0.0.1", normalize("http://10.0.0.1"));
        assert_eq!("10.0.0.1", normalize("htxxp://10.0.0.1"));
        assert_eq!("10.0.0.1", normalize("  10.0.0.1  "));
        assert_eq!("", normalize(""));
        assert_eq!("", normalize("   "));
    }

    #[test]
    fn combined_rewrites() {
        assert_eq!("8.8.8.8", normalize(" hxxp://8[.]8[.]8[.]8:443 "));
        assert_eq!("1.2.3.4/index.html", normalize("hxxp://1[.]2[.]3[.]4:80/index.html"));
    }

    #[test]
    fn leaves_unmatched_text_alone() {
        assert_eq!("https://1.2.3.4", normalize("https://1.2.3.4"));
        assert_eq!("not an ip", normalize("not an ip"));
        assert_eq!("1.2.3.4 (x)", normalize("1.2.3.4 (x)"));
        // only spaces are trimmed
        assert_eq!("\t1.2.3.4", normalize("\t1.2.3.4 "));
        assert_eq!("1[..]2", normalize("1[..]2"));
    }

    #[test]
    fn idempotent_on_output() {
        for line in &["1[.]2[.]3[.]4", " hxxp://9.9.9.9:53 ", "10.0.0.1", ""] {
            let once = normalize(line);
            assert_eq!(once, normalize(&once));
        }
    }

    #[quickcheck]
    fn deterministic(line: String) -> bool {
        normalize(&line) == Normalizer::new().normalize(&line)
    }

    #[quickcheck]
    fn never_space_padded(line: String) -> bool {
        let out = normalize(&line);
        !out.starts_with(' ') && !out.ends_with(' ')
    }

    #[quickcheck]
    fn dotted_quad_survives_defanging(a: u8, b: u8, c: u8, d: u8) -> bool {
        let plain = format!("{}.{}.{}.{}", a, b, c, d);
        let defanged = format!("{}[.]{}[.]{}[.]{}", a, b, c, d);
        normalize(&defanged) == plain && normalize(&plain) == plain
    }
}
