//! Query Combinator.

use pmr_core::enums::Combinator;

/// Dispatch units produced from the selected query texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combined {
    /// Nothing to run.
    NothingSelected,
    /// One composite expression.
    Merged(String),
    /// Each text runs on its own.
    Individual(Vec<String>),
}

impl Combined {
    /// Texts to dispatch, in order.
    #[must_use]
    pub fn into_units(self) -> Vec<String> {
        match self {
            Self::NothingSelected => Vec::new(),
            Self::Merged(text) => vec![text],
            Self::Individual(texts) => texts,
        }
    }
}

/// Combine selected texts. `And`/`Or` parenthesize every text and join with
/// the padded operator; a single text still gets its parentheses.
pub fn combine<S: AsRef<str>>(texts: &[S], kind: Combinator) -> Combined {
    if texts.is_empty() {
        return Combined::NothingSelected;
    }
    match kind.operator() {
        Some(operator) => Combined::Merged(
            texts
                .iter()
                .map(|text| format!("({})", text.as_ref()))
                .collect::<Vec<_>>()
                .join(&format!(" {operator} ")),
        ),
        None => Combined::Individual(texts.iter().map(|t| t.as_ref().to_string()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Combinator::And, "(A) AND (B)")]
    #[case(Combinator::Or, "(A) OR (B)")]
    fn merges_with_operator(#[case] kind: Combinator, #[case] expected: &str) {
        assert_eq!(combine(&["A", "B"], kind), Combined::Merged(expected.into()));
    }

    #[rstest]
    #[case(Combinator::And)]
    #[case(Combinator::Or)]
    #[case(Combinator::Individual)]
    fn zero_selected_is_nothing(#[case] kind: Combinator) {
        let none: [&str; 0] = [];
        assert_eq!(combine(&none, kind), Combined::NothingSelected);
    }

    #[test]
    fn single_text_keeps_parentheses() {
        assert_eq!(
            combine(&["triclosan[tiab]"], Combinator::And),
            Combined::Merged("(triclosan[tiab])".into())
        );
    }

    #[test]
    fn individual_keeps_order() {
        let combined = combine(&["B", "A"], Combinator::Individual);
        assert_eq!(combined.into_units(), vec!["B".to_string(), "A".to_string()]);
    }
}
