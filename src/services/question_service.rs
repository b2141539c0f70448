use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use rand::Rng;
use rand::seq::{SliceRandom, index};

use crate::db::Table;
use crate::models::question::Question;

/// Query value meaning "no constraint" for any selection dimension.
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    All,
    AnyOf(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestTypeFilter {
    All,
    Exactly(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCount {
    All,
    Exactly(NonZeroUsize),
}

/// Which questions to return and how many
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub subjects: SubjectFilter,
    pub test_type: TestTypeFilter,
    pub count: QuestionCount,
}

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("No questions match the requested filters")]
    EmptyResultSet,

    #[error("Invalid question count {0:?}: expected a positive integer or \"All\"")]
    InvalidCount(String),
}

impl SubjectFilter {
    /// Parses a comma separated list of categories.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            return SubjectFilter::All;
        }
        SubjectFilter::AnyOf(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    fn matches(&self, question: &Question) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::AnyOf(subjects) => question
                .subject
                .as_ref()
                .is_some_and(|subject| subjects.contains(subject)),
        }
    }
}

impl TestTypeFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            TestTypeFilter::All
        } else {
            TestTypeFilter::Exactly(value.to_string())
        }
    }

    fn matches(&self, question: &Question) -> bool {
        match self {
            TestTypeFilter::All => true,
            TestTypeFilter::Exactly(test_type) => question.test_type.as_ref() == Some(test_type),
        }
    }
}

impl QuestionCount {
    pub fn parse(value: &str) -> Result<Self, SelectError> {
        if value.is_empty() || value == ALL {
            return Ok(QuestionCount::All);
        }
        value
            .trim()
            .parse::<NonZeroUsize>()
            .map(QuestionCount::Exactly)
            .map_err(|_| SelectError::InvalidCount(value.to_string()))
    }
}

impl Selection {
    pub fn parse(subject: &str, test_type: &str, count: &str) -> Result<Self, SelectError> {
        Ok(Self {
            subjects: SubjectFilter::parse(subject),
            test_type: TestTypeFilter::parse(test_type),
            count: QuestionCount::parse(count)?,
        })
    }

    fn has_filters(&self) -> bool {
        self.subjects != SubjectFilter::All || self.test_type != TestTypeFilter::All
    }
}

/// Picks questions from the table.
///
/// * No filters and no count: the whole table in its current order.
/// * Filters and no count: every matching question, shuffled.
/// * A count: a uniform random sample of that size. When more questions are
///   requested than match, the sample is drawn with replacement so some
///   questions repeat.
pub fn select<R>(table: &Table, selection: &Selection, rng: &mut R) -> Result<Vec<Question>, SelectError>
where
    R: Rng + ?Sized,
{
    if !selection.has_filters() && selection.count == QuestionCount::All {
        return Ok(table.rows().to_vec());
    }

    let mut matches: Vec<&Question> = table
        .rows()
        .iter()
        .filter(|q| selection.subjects.matches(q) && selection.test_type.matches(q))
        .collect();

    let mut picked: Vec<Question> = match selection.count {
        QuestionCount::All => matches.drain(..).cloned().collect(),
        QuestionCount::Exactly(count) => {
            let count = count.get();
            if matches.is_empty() {
                return Err(SelectError::EmptyResultSet);
            }
            if count <= matches.len() {
                index::sample(rng, matches.len(), count)
                    .into_iter()
                    .map(|i| matches[i].clone())
                    .collect()
            } else {
                (0..count)
                    .map(|_| matches[rng.random_range(0..matches.len())].clone())
                    .collect()
            }
        }
    };

    picked.shuffle(rng);
    tracing::debug!("Selected {} of {} questions", picked.len(), table.rows().len());
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sentinels_and_lists() {
        let selection = Selection::parse("All", "All", "All").unwrap();
        assert_eq!(selection.subjects, SubjectFilter::All);
        assert_eq!(selection.test_type, TestTypeFilter::All);
        assert_eq!(selection.count, QuestionCount::All);

        let selection = Selection::parse("math,bio", "Exam", "5").unwrap();
        assert_eq!(
            selection.subjects,
            SubjectFilter::AnyOf(["bio".to_string(), "math".to_string()].into())
        );
        assert_eq!(selection.test_type, TestTypeFilter::Exactly("Exam".into()));
        assert_eq!(
            selection.count,
            QuestionCount::Exactly(NonZeroUsize::new(5).unwrap())
        );
    }

    #[test]
    fn rejects_non_positive_counts() {
        assert!(matches!(
            QuestionCount::parse("0"),
            Err(SelectError::InvalidCount(_))
        ));
        assert!(matches!(
            QuestionCount::parse("ten"),
            Err(SelectError::InvalidCount(_))
        ));
    }
}
