use fancy_regex::Regex;
use sidecar_relay_domain::DomainError;
use std::fmt;
use std::sync::Arc;

pub type HostPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One exemption from interception.
#[derive(Clone)]
pub enum DoNotProxyEntry {
    /// Case-insensitive exact match.
    Literal(String),
    Pattern(Regex),
    Predicate(HostPredicate),
}

impl DoNotProxyEntry {
    /// `/expr/` is a regular expression, anything containing `*` a glob, the rest a literal.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.len() > 2 && raw.starts_with('/') && raw.ends_with('/') {
            return Self::regex(&raw[1..raw.len() - 1]);
        }
        if raw.contains('*') {
            return Self::glob(raw);
        }
        Ok(Self::Literal(raw.to_ascii_lowercase()))
    }

    pub fn regex(expr: &str) -> Result<Self, DomainError> {
        Regex::new(expr).map(Self::Pattern).map_err(|e| {
            DomainError::ConfigError(format!("Invalid do-not-proxy pattern '{}': {}", expr, e))
        })
    }

    /// `*` matches any run of characters, including dots.
    pub fn glob(glob: &str) -> Result<Self, DomainError> {
        let mut expr = String::with_capacity(glob.len() + 8);
        expr.push_str("(?i)^");
        for c in glob.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '.' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\' => {
                    expr.push('\\');
                    expr.push(c);
                }
                _ => expr.push(c),
            }
        }
        expr.push('$');
        Self::regex(&expr)
    }

    pub fn matches(&self, host: &str) -> bool {
        match self {
            Self::Literal(literal) => literal.eq_ignore_ascii_case(host),
            Self::Pattern(regex) => regex.is_match(host).unwrap_or(false),
            Self::Predicate(predicate) => predicate(host),
        }
    }
}

impl fmt::Debug for DoNotProxyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Destinations exempt from interception; a host is exempt if any entry matches.
#[derive(Debug, Clone, Default)]
pub struct DoNotProxyList {
    entries: Vec<DoNotProxyEntry>,
}

impl DoNotProxyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<S: AsRef<str>>(raw: &[S]) -> Result<Self, DomainError> {
        let entries = raw
            .iter()
            .map(|entry| DoNotProxyEntry::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn push(&mut self, entry: DoNotProxyEntry) {
        self.entries.push(entry);
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.entries.push(DoNotProxyEntry::Predicate(Arc::new(predicate)));
        self
    }

    pub fn matches(&self, host: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(host))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
