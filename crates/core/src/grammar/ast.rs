use serde::{Deserialize, Serialize};

/// A term's count: a concrete number of players, or a non-numeric marker.
///
/// Markers never participate in additive combination across groups; they are
/// carried through to facet keys verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Count {
    /// A concrete count. `0` only occurs for an explicit `(0)` qualifier or
    /// as the synthetic "alternative not chosen" entry injected during facet
    /// accumulation.
    Num(u32),
    /// The instrument is optional (`(opt)` qualifier).
    Optional,
    /// An unspecified ensemble-sized contingent (`(ens)` qualifier).
    Ensemble,
}

impl Count {
    /// Whether this is the numeric count zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Count::Num(0))
    }

    /// The numeric value, if this count is numeric.
    pub fn as_num(&self) -> Option<u32> {
        match self {
            Count::Num(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Num(n) => write!(f, "{n}"),
            Count::Optional => write!(f, "optional"),
            Count::Ensemble => write!(f, "ensemble"),
        }
    }
}

/// One instrument requirement: a code and how many players it needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Term {
    /// Lowercase instrument code. Well-formed codes are runs of word
    /// characters and hyphens; fold-back of a malformed qualifier can
    /// produce codes containing spaces and parentheses.
    pub code: String,
    /// How many players this term requires. Defaults to `Num(1)` when the
    /// term carries no qualifier.
    pub count: Count,
}

/// An ordered, non-empty set of mutually exclusive requirements (OR-group).
///
/// Exactly one member is required. A group with a single term is an
/// unconditional requirement; written with `|` in the raw field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeGroup {
    /// The alternatives, in the order they appear in the raw segment.
    pub terms: Vec<Term>,
}

impl AlternativeGroup {
    /// Distinct instrument codes in first-occurrence order within the group.
    ///
    /// A code may repeat within one group (e.g. `cl|cl(2)`), giving the same
    /// instrument several alternative counts.
    pub fn distinct_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for term in &self.terms {
            if !codes.contains(&term.code.as_str()) {
                codes.push(&term.code);
            }
        }
        codes
    }

    /// All counts attached to `code` within this group, in term order.
    pub fn counts_for(&self, code: &str) -> Vec<Count> {
        self.terms
            .iter()
            .filter(|t| t.code == code)
            .map(|t| t.count.clone())
            .collect()
    }
}

/// An ordered AND-sequence of OR-groups: all groups are simultaneously
/// required, with exactly one alternative chosen per group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParsedInstrumentation {
    /// The alternative groups, sorted single-term-first (see
    /// [`ParsedInstrumentation::sort_single_term_first`]).
    pub groups: Vec<AlternativeGroup>,
}

impl ParsedInstrumentation {
    /// Stably sort groups so unconditional requirements (exactly one term)
    /// precede groups with two or more terms; within each class, original
    /// left-to-right field order is preserved.
    ///
    /// This gives deterministic faceting: an instrument's unconditional
    /// count is registered before any alternatives touch it. The parser
    /// applies this before returning; the facet generator never reorders.
    pub fn sort_single_term_first(&mut self) {
        self.groups.sort_by_key(|g| g.terms.len() > 1);
    }

    /// Whether the sequence contains no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
