//! Human name parsing for legacy creator names
//!
//! Legacy creators carry a single free-text `name`; RDM wants given and family
//! names. Both `"First Middle Last"` and `"Last, First Middle"` orders are
//! understood.

const TITLES: &[&str] = &["dr", "prof", "mr", "mrs", "ms", "miss", "sir"];

const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "phd", "md"];

/// Lowercase surname prefixes that belong to the last name
const PARTICLES: &[&str] = &[
    "van", "von", "de", "der", "den", "da", "das", "dos", "del", "della", "di", "du", "la", "le",
    "ter", "ten",
];

fn normalized(token: &str) -> String {
    token.trim_end_matches('.').to_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&normalized(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&normalized(token).as_str())
}

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&token)
}

/// Parsed name components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanName {
    pub title: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl HumanName {
    /// Parse a free-text name
    pub fn parse(full_name: &str) -> Self {
        let parts: Vec<&str> = full_name
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Self::default(),
            [single] => Self::parse_natural(single, Vec::new()),
            [head, rest @ ..] if rest.iter().all(|p| p.split_whitespace().all(is_suffix)) => {
                // "First Last, Jr."
                Self::parse_natural(head, rest.iter().map(|s| s.to_string()).collect())
            }
            [last, given, suffixes @ ..] => {
                let mut name = Self::default();
                let mut tokens: Vec<&str> = given.split_whitespace().collect();
                name.title = take_titles(&mut tokens);
                let mut suffix: Vec<String> = take_suffixes(&mut tokens);
                suffix.extend(suffixes.iter().map(|s| s.to_string()));
                name.suffix = suffix.join(", ");
                if let Some((first, middle)) = tokens.split_first() {
                    name.first = first.to_string();
                    name.middle = middle.join(" ");
                }
                name.last = last.split_whitespace().collect::<Vec<_>>().join(" ");
                name
            }
        }
    }

    /// "First Middle Last" order
    fn parse_natural(text: &str, extra_suffixes: Vec<String>) -> Self {
        let mut name = Self::default();
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        name.title = take_titles(&mut tokens);
        let mut suffix = take_suffixes(&mut tokens);
        suffix.extend(extra_suffixes);
        name.suffix = suffix.join(", ");

        match tokens.len() {
            0 => {}
            1 => name.first = tokens[0].to_string(),
            n => {
                let mut last_start = n - 1;
                while last_start > 1 && is_particle(tokens[last_start - 1]) {
                    last_start -= 1;
                }
                name.first = tokens[0].to_string();
                name.middle = tokens[1..last_start].join(" ");
                name.last = tokens[last_start..].join(" ");
            }
        }
        name
    }

    /// Middle and last names joined, as used for the RDM family name
    pub fn surnames(&self) -> String {
        [self.middle.as_str(), self.last.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Strip leading titles, keeping them when nothing else would remain
fn take_titles(tokens: &mut Vec<&str>) -> String {
    let count = tokens.iter().take_while(|t| is_title(t)).count();
    if count == 0 || count == tokens.len() {
        return String::new();
    }
    tokens.drain(..count).collect::<Vec<_>>().join(" ")
}

/// Strip trailing suffixes, keeping them when nothing else would remain
fn take_suffixes(tokens: &mut Vec<&str>) -> Vec<String> {
    let count = tokens.iter().rev().take_while(|t| is_suffix(t)).count();
    if count == 0 || count == tokens.len() {
        return Vec::new();
    }
    let start = tokens.len() - count;
    tokens.drain(start..).map(str::to_string).collect()
}
