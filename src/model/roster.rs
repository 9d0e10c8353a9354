//! Domain model for flat-file member rosters.

/// Marker that starts a section header line in roster files.
pub const SECTION_MARKER: char = '#';

/// A named block of roster entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterSection {
    /// Header text after the marker; empty for entries before any header.
    pub name: String,
    pub members: Vec<String>,
}

/// Parsed roster file.
///
/// Section header lines and blank lines are never counted as members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub sections: Vec<RosterSection>,
}

impl Roster {
    /// Parses roster lines.
    ///
    /// Lines starting with `SECTION_MARKER` open a new section; blank lines are
    /// skipped; every other line (trimmed) is a member of the current section.
    pub fn parse<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sections: Vec<RosterSection> = Vec::new();

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix(SECTION_MARKER) {
                sections.push(RosterSection {
                    name: header.trim_start_matches(SECTION_MARKER).trim().to_string(),
                    members: Vec::new(),
                });
                continue;
            }

            match sections.last_mut() {
                Some(section) => section.members.push(line.to_string()),
                None => sections.push(RosterSection {
                    name: String::new(),
                    members: vec![line.to_string()],
                }),
            }
        }

        Self { sections }
    }

    /// Total number of members across all sections.
    pub fn count(&self) -> usize {
        self.sections.iter().map(|s| s.members.len()).sum()
    }

    /// Finds a section by name, ignoring case and surrounding whitespace.
    pub fn section(&self, name: &str) -> Option<&RosterSection> {
        let name = name.trim();
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
