use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

const IMPORTANT_MODIFIER: &str = "^$important";
const EXCEPTION_MARKER: &str = "@@";

/// User action coming from a query log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Block,
    Unblock,
}

impl ToggleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleAction::Block => "block",
            ToggleAction::Unblock => "unblock",
        }
    }
}

/// High-priority override line for a single domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKind {
    /// `||domain^$important`
    Deny,
    /// `@@||domain^$important`
    Allow,
}

impl OverrideKind {
    pub fn rule_for(&self, domain: &str) -> String {
        match self {
            OverrideKind::Deny => format!("||{}{}", domain, IMPORTANT_MODIFIER),
            OverrideKind::Allow => format!("{}||{}{}", EXCEPTION_MARKER, domain, IMPORTANT_MODIFIER),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            OverrideKind::Deny => OverrideKind::Allow,
            OverrideKind::Allow => OverrideKind::Deny,
        }
    }
}

impl From<ToggleAction> for OverrideKind {
    /// The override a toggle installs when neither override exists yet.
    fn from(action: ToggleAction) -> Self {
        match action {
            ToggleAction::Block => OverrideKind::Deny,
            ToggleAction::Unblock => OverrideKind::Allow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleChangeKind {
    Added,
    Removed,
}

/// What a toggle did to the rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChange {
    pub kind: RuleChangeKind,
    pub rule: String,
}

impl RuleChange {
    fn added(rule: String) -> Self {
        Self {
            kind: RuleChangeKind::Added,
            rule,
        }
    }

    fn removed(rule: String) -> Self {
        Self {
            kind: RuleChangeKind::Removed,
            rule,
        }
    }
}

/// Newline-delimited custom filtering rules, kept byte-exact.
///
/// Lines that are not overrides are opaque and never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(String);

impl RuleSet {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rule lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.line_spans().map(move |span| &self.0[span.content])
    }

    pub fn contains_rule(&self, rule: &str) -> bool {
        self.line_spans().any(|span| &self.0[span.content] == rule)
    }

    /// Which override, if any, is currently in effect for `domain`.
    pub fn override_for(&self, domain: &str) -> Option<OverrideKind> {
        if self.contains_rule(&OverrideKind::Allow.rule_for(domain)) {
            Some(OverrideKind::Allow)
        } else if self.contains_rule(&OverrideKind::Deny.rule_for(domain)) {
            Some(OverrideKind::Deny)
        } else {
            None
        }
    }

    /// Computes the rule list after a block/unblock action on `domain`.
    ///
    /// A contradicting override is removed first; only when there is none is
    /// the action's own override appended. An already satisfied action is a
    /// no-op and yields no change.
    pub fn toggle(
        &self,
        domain: &str,
        action: ToggleAction,
    ) -> Result<(RuleSet, Option<RuleChange>), DomainError> {
        validate_domain(domain)?;

        let to_add = OverrideKind::from(action);
        let add_rule = to_add.rule_for(domain);
        let remove_rule = to_add.opposite().rule_for(domain);

        if let Some(next) = self.without_rule(&remove_rule) {
            return Ok((next, Some(RuleChange::removed(remove_rule))));
        }

        if self.contains_rule(&add_rule) {
            return Ok((self.clone(), None));
        }

        Ok((self.with_rule(&add_rule), Some(RuleChange::added(add_rule))))
    }

    /// Drops every line equal to `rule`, terminators included.
    /// Returns `None` when no line matched.
    fn without_rule(&self, rule: &str) -> Option<RuleSet> {
        let mut text = String::with_capacity(self.0.len());
        let mut cursor = 0;
        let mut matched = false;

        for span in self.line_spans() {
            if &self.0[span.content.clone()] == rule {
                text.push_str(&self.0[cursor..span.full.start]);
                cursor = span.full.end;
                matched = true;
            }
        }

        if !matched {
            return None;
        }

        text.push_str(&self.0[cursor..]);
        Some(RuleSet(text))
    }

    fn with_rule(&self, rule: &str) -> RuleSet {
        let mut text = String::with_capacity(self.0.len() + rule.len() + 2);
        text.push_str(&self.0);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(rule);
        text.push('\n');
        RuleSet(text)
    }

    fn line_spans(&self) -> LineSpans<'_> {
        LineSpans {
            text: &self.0,
            offset: 0,
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RuleSet {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RuleSet {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

fn validate_domain(domain: &str) -> Result<(), DomainError> {
    if domain.trim().is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain must not be empty".to_string(),
        ));
    }
    // One rule per line: anything that could split a line is rejected.
    if domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(DomainError::InvalidDomainName(domain.to_string()));
    }
    Ok(())
}

struct LineSpan {
    /// Line text without `\n` / `\r\n`.
    content: Range<usize>,
    /// Line text including its terminator, if any.
    full: Range<usize>,
}

struct LineSpans<'a> {
    text: &'a str,
    offset: usize,
}

impl Iterator for LineSpans<'_> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        if self.offset >= self.text.len() {
            return None;
        }

        let start = self.offset;
        let rest = &self.text[start..];
        let (line_end, full_end) = match rest.find('\n') {
            Some(pos) => (start + pos, start + pos + 1),
            None => (self.text.len(), self.text.len()),
        };
        let content_end = if self.text[start..line_end].ends_with('\r') {
            line_end - 1
        } else {
            line_end
        };

        self.offset = full_end;
        Some(LineSpan {
            content: start..content_end,
            full: start..full_end,
        })
    }
}
