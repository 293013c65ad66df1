//! Task line parser.
//!
//! Parses one annotated line like `Buy milk @shopping !today ^tomorrow`
//! into a [`TaskDraft`].
//!
//! The grammar is `<description> [@category] [!priority] [~recurring] [^due]`.
//! Markers are optional but must appear in that order. The description is
//! the shortest prefix after which the remaining markers account for the rest
//! of the line, so a marker that does not fit (a lone `!`, an unknown
//! priority, markers out of order) simply stays in the description.

use crate::tasks::{Priority, Recurrence, TaskDraft};

const CATEGORY_MARKER: char = '@';
const PRIORITY_MARKER: char = '!';
const RECURRING_MARKER: char = '~';
const DUE_MARKER: char = '^';

/// Fields matched after the description, as char ranges into the line.
#[derive(Debug, Default)]
struct Fields {
    category: Option<(usize, usize)>,
    priority: Priority,
    recurring: Recurrence,
    due: Option<(usize, usize)>,
}

/// Ordered optional sub-matchers over one line.
///
/// Each stage tries to match its marker at `pos` and continues with the next
/// stage; if the rest of the line then fails, it retries without its marker.
/// The first complete match wins.
struct Matcher<'a> {
    chars: &'a [char],
}

impl Matcher<'_> {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn skip_ws(&self, mut pos: usize) -> usize {
        while self.at(pos).is_some_and(char::is_whitespace) {
            pos += 1;
        }
        pos
    }

    fn text(&self, (start, end): (usize, usize)) -> String {
        self.chars[start..end].iter().collect::<String>().trim().to_string()
    }

    /// `<ws>+ @ <anything but ! ~ ^>+`, longest body first.
    fn category(&self, pos: usize) -> Option<Fields> {
        let marker = self.skip_ws(pos);
        if marker > pos && self.at(marker) == Some(CATEGORY_MARKER) {
            let body = marker + 1;
            let limit = (body..self.len())
                .find(|&i| matches!(self.chars[i], PRIORITY_MARKER | RECURRING_MARKER | DUE_MARKER))
                .unwrap_or(self.len());

            for end in (body + 1..=limit).rev() {
                if let Some(mut fields) = self.priority(end) {
                    fields.category = Some((body, end));
                    return Some(fields);
                }
            }
        }
        self.priority(pos)
    }

    /// `<ws>* ! <ws>* (urgent|today|tomorrow|later)`
    fn priority(&self, pos: usize) -> Option<Fields> {
        if let Some((priority, end)) =
            self.keyword(pos, PRIORITY_MARKER, &Priority::TOKENS, |p| p.as_str())
        {
            if let Some(mut fields) = self.recurring(end) {
                fields.priority = priority;
                return Some(fields);
            }
        }
        self.recurring(pos)
    }

    /// `<ws>* ~ <ws>* (daily|weekly|monthly)`
    fn recurring(&self, pos: usize) -> Option<Fields> {
        if let Some((recurring, end)) =
            self.keyword(pos, RECURRING_MARKER, &Recurrence::TOKENS, |r| r.as_str())
        {
            if let Some(mut fields) = self.due(end) {
                fields.recurring = recurring;
                return Some(fields);
            }
        }
        self.due(pos)
    }

    /// `<ws>* ^ <ws>* <rest of line>`
    fn due(&self, pos: usize) -> Option<Fields> {
        let marker = self.skip_ws(pos);
        if self.at(marker) == Some(DUE_MARKER) {
            let start = self.skip_ws(marker + 1);
            if start < self.len() && !self.chars[start..].contains(&'\n') {
                return Some(Fields {
                    due: Some((start, self.len())),
                    ..Fields::default()
                });
            }
        }
        self.end(pos)
    }

    fn end(&self, pos: usize) -> Option<Fields> {
        (pos == self.len()).then(Fields::default)
    }

    /// Match a marker followed by one of `tokens`, ignoring ASCII case.
    fn keyword<T: Copy>(
        &self,
        pos: usize,
        marker: char,
        tokens: &[T],
        name: impl Fn(T) -> &'static str,
    ) -> Option<(T, usize)> {
        let at = self.skip_ws(pos);
        if self.at(at) != Some(marker) {
            return None;
        }
        let start = self.skip_ws(at + 1);

        tokens.iter().copied().find_map(|token| {
            let word = name(token);
            let end = start + word.chars().count();
            let candidate = self.chars.get(start..end)?;
            candidate
                .iter()
                .zip(word.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
                .then_some((token, end))
        })
    }
}

/// Parse one task line into a draft.
///
/// The line is trimmed first. An empty line yields a draft with an empty
/// description, which callers discard. If the grammar cannot account for the
/// line at all (only possible with embedded newlines), the whole line becomes
/// the description.
///
/// # Examples
///
/// ```
/// use marktask::features::nlp::parse_line;
/// use marktask::tasks::Priority;
///
/// let draft = parse_line("Buy milk @shopping !today ^tomorrow");
/// assert_eq!(draft.description, "Buy milk");
/// assert_eq!(draft.category, "shopping");
/// assert_eq!(draft.priority, Priority::Today);
/// assert_eq!(draft.due_text, "tomorrow");
/// ```
#[must_use]
pub fn parse_line(line: &str) -> TaskDraft {
    let line = line.trim();
    let chars: Vec<char> = line.chars().collect();
    let matcher = Matcher { chars: &chars };

    // Shortest description first; it may not span a line break.
    for split in 1..=chars.len() {
        if chars[split - 1] == '\n' {
            break;
        }
        if let Some(fields) = matcher.category(split) {
            return TaskDraft {
                description: matcher.text((0, split)),
                category: fields.category.map(|r| matcher.text(r)).unwrap_or_default(),
                priority: fields.priority,
                recurring: fields.recurring,
                due_text: fields.due.map(|r| matcher.text(r)).unwrap_or_default(),
            };
        }
    }

    if !line.is_empty() {
        log::debug!("Marker grammar did not match {line:?}; using the whole line");
    }
    TaskDraft {
        description: line.to_string(),
        ..TaskDraft::default()
    }
}
