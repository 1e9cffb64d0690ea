use regex_automata::{
    MatchKind,
    meta::{self, Regex},
    util,
};

use super::error::Error;

/// Singular rewrite rule definition.
///
/// Contains a compiled regex pattern matched against the full request
/// url and a replacement template expanded for every match. Both are
/// fixed at construction, so a compiled rule is freely shared across
/// any number of in-flight requests.
#[derive(Clone, Debug)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Compiles a regex pattern and replacement template into a [`Rule`].
    ///
    /// Fails when the pattern is not a valid regular expression. The
    /// replacement template is kept as-is; `$N` references to groups the
    /// pattern never captures expand to the empty string at rewrite time.
    pub fn compile(pattern: &str, replacement: &str) -> Result<Self, Error> {
        let regex = Regex::builder()
            .configure(
                meta::Config::new()
                    .nfa_size_limit(Some(10 * (1 << 20)))
                    .hybrid_cache_capacity(2 * (1 << 20))
                    .match_kind(MatchKind::LeftmostFirst)
                    .utf8_empty(true),
            )
            .build(pattern)
            .map_err(|err| Error::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.to_owned(),
        })
    }

    /// Replaces every non-overlapping match of the rule pattern within
    /// the given url with the expanded replacement template.
    ///
    /// `$N` references in the template expand to the capture groups of
    /// the match that produced that replacement span. Returns the input
    /// verbatim when nothing matches.
    pub fn replace_all(&self, url: &str) -> String {
        let mut dst = String::with_capacity(url.len());
        let mut last = 0;
        for caps in self.pattern.captures_iter(url) {
            let Some(found) = caps.get_match() else {
                continue;
            };
            dst.push_str(&url[last..found.start()]);
            util::interpolate::string(
                &self.replacement,
                |index, dst| {
                    if let Some(span) = caps.get_group(index) {
                        dst.push_str(&url[span]);
                    }
                },
                |name| caps.group_info().to_index(caps.pattern()?, name),
                &mut dst,
            );
            last = found.end();
        }
        dst.push_str(&url[last..]);
        dst
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_compile_invalid() {
        assert!(Rule::compile("[", "something").is_err());
    }

    #[test]
    fn test_simple_replace() {
        let rule = Rule::compile("hello", "goodbye").unwrap();
        assert_eq!(
            rule.replace_all("//example.com/hello"),
            "//example.com/goodbye"
        );
    }

    #[test]
    fn test_no_match() {
        let rule = Rule::compile("goodbye", "something-else").unwrap();
        assert_eq!(
            rule.replace_all("//example.com/hello"),
            "//example.com/hello"
        );
    }

    #[test]
    fn test_strip_query() {
        let rule = Rule::compile(r"(.+)\?(.+)", "$1").unwrap();
        assert_eq!(
            rule.replace_all("//example.com/hello?param=234&another=123"),
            "//example.com/hello"
        );
    }

    #[test]
    fn test_subdomain_to_prefix() {
        let rule = Rule::compile(
            r"//(cust-(\w+))\.example\.com/prefix/(.+)",
            "//$1.example.com/$2/$3",
        )
        .unwrap();
        assert_eq!(
            rule.replace_all("//cust-company1.example.com/prefix/hello"),
            "//cust-company1.example.com/company1/hello"
        );

        let rule = Rule::compile(r"//cust-(\w+)(.+)prefix/(.+)", "//cust-$1$2$1/$3").unwrap();
        assert_eq!(
            rule.replace_all("//cust-company1.example.com/prefix/hello"),
            "//cust-company1.example.com/company1/hello"
        );
    }

    #[test]
    fn test_unknown_group_expands_empty() {
        let rule = Rule::compile("/old/(.+)", "/new/$2/$1").unwrap();
        assert_eq!(rule.replace_all("/old/doc"), "/new//doc");
    }

    #[test]
    fn test_deterministic() {
        let rule = Rule::compile(r"/prefix/(.+)", "/$1").unwrap();
        let first = rule.replace_all("//example.com/prefix/a/b?x=1");
        for _ in 0..3 {
            assert_eq!(rule.replace_all("//example.com/prefix/a/b?x=1"), first);
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let rule = Arc::new(Rule::compile("/prefix/(.+)", "/$1").unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let rule = Arc::clone(&rule);
                std::thread::spawn(move || {
                    rule.replace_all(&format!("//host-{i}.example.com/prefix/doc-{i}"))
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("//host-{i}.example.com/doc-{i}")
            );
        }
    }
}
