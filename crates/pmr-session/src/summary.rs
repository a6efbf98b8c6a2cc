//! One-article relevance summary.

use chrono::{DateTime, Utc};
use pmr_core::entities::Article;
use pmr_core::ports::StructuredCompleter;
use pmr_core::protocol::{CompletionRequest, SummaryRequest, TypedResponse};

use crate::error::SessionError;
use crate::state::Session;

impl Session {
    /// Ask for a short summary of why `article` matters to this researcher.
    ///
    /// The transcript is not touched; a summary is not a chat turn.
    ///
    /// # Errors
    ///
    /// - `MutationFailure` if the call fails or returns an empty answer
    /// - `UnexpectedResponse` if the response is not an answer
    pub async fn summarize_article<C>(
        &self,
        article: &Article,
        completer: &C,
    ) -> Result<String, SessionError>
    where
        C: StructuredCompleter + ?Sized,
    {
        if !self.setup.has_context() {
            tracing::warn!(pmid = %article.pmid, "summary: no researcher context, summary will be generic");
        }
        let request = CompletionRequest::Summary(SummaryRequest {
            question: self.summary_question(article),
        });

        match Self::complete(completer, &request).await? {
            TypedResponse::Answer(answer) if !answer.trim().is_empty() => Ok(answer),
            TypedResponse::Answer(_) => Err(SessionError::MutationFailure {
                reason: "no response from model".into(),
            }),
            other => Err(SessionError::UnexpectedResponse {
                expected: "answer",
                received: other.kind(),
            }),
        }
    }

    fn summary_question(&self, article: &Article) -> String {
        let abstract_text = article
            .abstract_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("No abstract available");
        let mut question = format!("Title: {}\nAbstract: {abstract_text}", article.title);
        if self.setup.has_context() {
            question.push_str(&format!(
                "\nResearcher Background: {}\nResearcher Goal: {}",
                self.setup.researcher_background, self.setup.researcher_goal
            ));
        }
        question
    }
}

/// Append a timestamped summary block to a note.
#[must_use]
pub fn append_summary(note: &str, answer: &str, at: DateTime<Utc>) -> String {
    format!("{note}\n\nAI Summary ({}):\n{answer}", at.format("%Y-%m-%d %H:%M"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pmr_core::entities::Setup;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::FakeCompleter;

    fn article(abstract_text: Option<&str>) -> Article {
        Article {
            pmid: "1".into(),
            title: "Triclosan in liver".into(),
            abstract_text: abstract_text.map(str::to_string),
            ..Article::default()
        }
    }

    #[tokio::test]
    async fn question_includes_researcher_context() {
        let mut session = Session::default();
        session.set_setup(Setup {
            researcher_background: "toxicologist".into(),
            researcher_goal: "liver toxicity".into(),
            ..Setup::default()
        });
        let completer = FakeCompleter::replying(TypedResponse::Answer("Relevant.".into()));

        let answer = session
            .summarize_article(&article(Some("Mice were exposed.")), &completer)
            .await
            .unwrap();

        assert_eq!(answer, "Relevant.");
        let CompletionRequest::Summary(request) = &completer.requests()[0] else {
            panic!("expected a summary request");
        };
        assert_eq!(
            request.question,
            "Title: Triclosan in liver\nAbstract: Mice were exposed.\n\
             Researcher Background: toxicologist\nResearcher Goal: liver toxicity"
        );
    }

    #[tokio::test]
    async fn missing_abstract_is_stated() {
        let session = Session::default();
        let completer = FakeCompleter::replying(TypedResponse::Answer("Generic.".into()));

        session
            .summarize_article(&article(None), &completer)
            .await
            .unwrap();

        let CompletionRequest::Summary(request) = &completer.requests()[0] else {
            panic!("expected a summary request");
        };
        assert_eq!(
            request.question,
            "Title: Triclosan in liver\nAbstract: No abstract available"
        );
    }

    #[tokio::test]
    async fn empty_answer_is_a_failure() {
        let session = Session::default();
        let completer = FakeCompleter::replying(TypedResponse::Answer("  ".into()));

        let err = session
            .summarize_article(&article(None), &completer)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::MutationFailure { .. }));
    }

    #[test]
    fn summary_block_is_timestamped() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 9, 7, 0).unwrap();
        assert_eq!(
            append_summary("my note", "Key finding.", at),
            "my note\n\nAI Summary (2026-03-04 09:07):\nKey finding."
        );
    }
}
