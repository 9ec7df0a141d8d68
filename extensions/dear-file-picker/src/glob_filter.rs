use regex::Regex;

use crate::logging::picker_warn;

/// Compiled file-name filter built from a simple glob pattern.
///
/// Only two characters are translated: `.` matches a literal dot and `*`
/// matches any sequence. The whole name must match. Filters only ever apply to
/// files; directories are always listed.
#[derive(Clone, Debug, Default)]
pub struct GlobFilter {
    regex: Option<Regex>,
}

impl GlobFilter {
    /// A filter that lets every name through.
    pub fn pass_all() -> Self {
        Self { regex: None }
    }

    /// Compile `pattern`.
    ///
    /// Empty, `*` and single-space patterns pass everything, as does any
    /// pattern that fails to compile.
    pub fn compile(pattern: &str) -> Self {
        if is_pass_all_pattern(pattern) {
            return Self::pass_all();
        }
        let source = format!("^(?:{})$", glob_to_regex(pattern));
        match Regex::new(&source) {
            Ok(regex) => Self { regex: Some(regex) },
            Err(_err) => {
                picker_warn!(pattern, err = %_err, "invalid filter pattern, showing all files");
                Self::pass_all()
            }
        }
    }

    /// Compile the pattern at `index` of `patterns`, or pass-all when out of range.
    pub fn from_patterns(patterns: &[String], index: usize) -> Self {
        patterns
            .get(index)
            .map(|p| Self::compile(p))
            .unwrap_or_default()
    }

    /// Whether this filter lets every name through.
    pub fn is_pass_all(&self) -> bool {
        self.regex.is_none()
    }

    /// Test a file name against the filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

fn is_pass_all_pattern(pattern: &str) -> bool {
    matches!(pattern, "" | "*" | " ")
}

/// `.` becomes `\.` and `*` becomes `.*`; everything else is kept verbatim.
pub(crate) fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    for ch in glob.chars() {
        match ch {
            '.' => out.push_str("\\."),
            '*' => out.push_str(".*"),
            other => out.push(other),
        }
    }
    out
}
