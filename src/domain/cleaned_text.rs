const QUOTES: [char; 2] = ['"', '\''];

/// A form value with surrounding whitespace and one layer of quoting removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedText(String);

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CleanedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CleanedText {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl CleanedText {
    /// Trims the value, then strips a single leading and a single trailing
    /// quote character. The two quotes do not have to match.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unquoted = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
        let unquoted = unquoted.strip_suffix(QUOTES).unwrap_or(unquoted);
        Self(unquoted.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
