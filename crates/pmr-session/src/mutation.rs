//! Mutation Protocol: one chat instruction → one structured completion →
//! merge into settings and/or append queries.
//!
//! The instruction is recorded in the transcript before the call. Nothing
//! else changes until the response has been checked and the merged settings
//! validated, so a failed call or rejected merge leaves the session exactly
//! as it was apart from that transcript entry.

use pmr_core::entities::{ChatMessage, Settings};
use pmr_core::ports::StructuredCompleter;
use pmr_core::protocol::{
    CompletionRequest, QueryRefinementRequest, QuerySuggestion, SettingsRefinementRequest,
    TypedResponse,
};
use serde::Serialize;

use crate::error::SessionError;
use crate::state::Session;

const MSG_SETTINGS_UPDATED: &str = "Settings and queries updated!";
const MSG_QUERIES_GENERATED: &str = "New queries generated!";
const MSG_NO_UPDATES: &str = "No updates were made from your input";

/// What a successful mutation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub settings_changed: bool,
    /// Ids of appended queries, in order.
    pub added_query_ids: Vec<String>,
    /// The assistant message added to the transcript.
    pub message: String,
}

impl Session {
    /// Refine settings from a chat instruction. The response may also carry
    /// new queries.
    ///
    /// # Errors
    ///
    /// - `MutationFailure` if the completion call fails
    /// - `UnexpectedResponse` if it returns something other than a settings update
    /// - `Constraint` if the merged settings are invalid
    pub async fn refine_settings<C>(
        &mut self,
        completer: &C,
        instruction: &str,
    ) -> Result<MutationOutcome, SessionError>
    where
        C: StructuredCompleter + ?Sized,
    {
        self.transcript.push(ChatMessage::user(instruction));
        let request = CompletionRequest::Settings(SettingsRefinementRequest {
            setup: self.setup.clone(),
            current_settings: self.settings(),
            queries_to_generate: self.queries_to_generate(),
            instruction: instruction.to_string(),
        });

        let response = Self::complete(completer, &request).await?;
        let (settings, queries) = match response {
            TypedResponse::SettingsUpdate { settings, queries } => (settings, queries),
            other => {
                return Err(SessionError::UnexpectedResponse {
                    expected: "settings_update",
                    received: other.kind(),
                });
            }
        };

        let update = if self.advanced_mode {
            settings
        } else {
            Settings::Simple(settings.simple().clone())
        };
        let mut merged = self.settings.clone();
        merged.apply(&update);
        merged.project(self.advanced_mode).validate()?;

        let settings_changed = merged != self.settings;
        self.settings = merged;
        let added_query_ids = self.append_suggestions(&queries);

        let message = if settings_changed || !added_query_ids.is_empty() {
            MSG_SETTINGS_UPDATED
        } else {
            tracing::warn!("mutation: settings response changed nothing");
            MSG_NO_UPDATES
        };
        tracing::info!(
            settings_changed,
            queries_added = added_query_ids.len(),
            "mutation: settings refined"
        );
        Ok(self.finish(settings_changed, added_query_ids, message))
    }

    /// Generate new queries from a chat instruction, using the visible
    /// queries as reference.
    ///
    /// # Errors
    ///
    /// - `MutationFailure` if the completion call fails
    /// - `UnexpectedResponse` if it returns something other than a query list
    pub async fn refine_queries<C>(
        &mut self,
        completer: &C,
        instruction: &str,
    ) -> Result<MutationOutcome, SessionError>
    where
        C: StructuredCompleter + ?Sized,
    {
        self.transcript.push(ChatMessage::user(instruction));
        let request = CompletionRequest::Queries(QueryRefinementRequest {
            setup: self.setup.clone(),
            settings: self.settings(),
            recent_queries: self.queries.visible().map(|q| q.text.clone()).collect(),
            queries_to_generate: self.queries_to_generate(),
            instruction: instruction.to_string(),
        });

        let response = Self::complete(completer, &request).await?;
        let queries = match response {
            TypedResponse::QueryList(queries) => queries,
            other => {
                return Err(SessionError::UnexpectedResponse {
                    expected: "query_list",
                    received: other.kind(),
                });
            }
        };

        let added_query_ids = self.append_suggestions(&queries);
        let message = if added_query_ids.is_empty() {
            MSG_NO_UPDATES
        } else {
            MSG_QUERIES_GENERATED
        };
        tracing::info!(queries_added = added_query_ids.len(), "mutation: queries generated");
        Ok(self.finish(false, added_query_ids, message))
    }

    pub(crate) async fn complete<C>(
        completer: &C,
        request: &CompletionRequest,
    ) -> Result<TypedResponse, SessionError>
    where
        C: StructuredCompleter + ?Sized,
    {
        tracing::debug!(mode = %request.mode(), "mutation: completion call");
        completer.complete(request).await.map_err(|e| {
            tracing::warn!(mode = %request.mode(), error = %e, "mutation: completion failed");
            SessionError::MutationFailure {
                reason: e.to_string(),
            }
        })
    }

    /// Append suggestions as new queries with seeded edit buffers.
    fn append_suggestions(&mut self, suggestions: &[QuerySuggestion]) -> Vec<String> {
        let ids = self.queries.append_suggestions(suggestions);
        for (id, suggestion) in ids.iter().zip(suggestions) {
            self.editor_buffers
                .insert(id.clone(), suggestion.query_text.clone());
        }
        ids
    }

    fn finish(
        &mut self,
        settings_changed: bool,
        added_query_ids: Vec<String>,
        message: &str,
    ) -> MutationOutcome {
        self.transcript.push(ChatMessage::assistant(message));
        MutationOutcome {
            settings_changed,
            added_query_ids,
            message: message.to_string(),
        }
    }
}
