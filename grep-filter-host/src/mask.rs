//! Buffer/tag masks and line patterns used to evaluate filters.
//!
//! Masks are comma-separated glob lists where `*` matches any run of
//! characters and a leading `!` turns an item into an exclusion. Line patterns
//! are case-insensitive regexes; a leading `!` negates, `\!` escapes a literal
//! `!`, and `*` alone selects every line.

use regex::{Regex, RegexBuilder};

use crate::error::HostError;

fn glob_to_regex(glob: &str) -> Result<Regex, HostError> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    let pattern = format!("^{body}$");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| HostError::InvalidRegex { pattern, source })
}

/// A compiled comma-separated glob list.
#[derive(Debug, Clone)]
pub struct GlobList {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl GlobList {
    pub fn parse(mask: &str) -> Result<Self, HostError> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for item in mask.split(',').filter(|item| !item.is_empty()) {
            match item.strip_prefix('!') {
                Some(excluded) => exclude.push(glob_to_regex(excluded)?),
                None => include.push(glob_to_regex(item)?),
            }
        }
        Ok(Self { include, exclude })
    }

    /// True when some include item matches and no exclude item does.
    pub fn matches(&self, name: &str) -> bool {
        self.include.iter().any(|re| re.is_match(name))
            && !self.exclude.iter().any(|re| re.is_match(name))
    }

    /// True when any of `names` is matched by the list.
    pub fn matches_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.matches(name.as_ref()))
    }
}

/// Which lines of a buffer a filter selects for hiding.
#[derive(Debug, Clone)]
pub struct LinePattern {
    /// `None` selects every line.
    regex: Option<Regex>,
    negated: bool,
}

impl LinePattern {
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        if raw == "*" {
            return Ok(Self {
                regex: None,
                negated: false,
            });
        }

        let (body, negated) = if let Some(escaped) = raw.strip_prefix("\\!") {
            (format!("!{escaped}"), false)
        } else if let Some(body) = raw.strip_prefix('!') {
            (body.to_string(), true)
        } else {
            (raw.to_string(), false)
        };

        // An empty body selects every line, negated or not.
        if body.is_empty() {
            return Ok(Self {
                regex: None,
                negated: false,
            });
        }

        let regex = RegexBuilder::new(&body)
            .case_insensitive(true)
            .build()
            .map_err(|source| HostError::InvalidRegex {
                pattern: raw.to_string(),
                source,
            })?;
        Ok(Self {
            regex: Some(regex),
            negated,
        })
    }

    pub fn selects(&self, message: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(message) != self.negated,
            None => true,
        }
    }
}
