//! Screening session: `Intake → CategoryBrowsing → Answering → Submitted`.
//!
//! One session owns the profile, answers, result and chat history, and
//! discards them together on reset. State lives behind a `RwLock` that is
//! never held across an AI call; the `AiGate` keeps at most one analysis
//! and one chat request in flight.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::{
    compile_narrative, filter_categories, CategoryFilter, FlowError, IntakeSummary, ProfileDraft,
    QuestionFlow, ValidationError,
};
use crate::ai_gate::{ActiveOperation, AiGate, OperationKind};
use crate::catalog::CATEGORY_FLOWS;
use crate::models::{BodyRegion, CategoryFlow, ChatTurn, PatientProfile, ScreeningResult};
use crate::pipeline::chat::{
    append_turn, build_chat_request, reply_or_default, welcome_turn, ChatContext, FALLBACK_REPLY,
};
use crate::pipeline::client::AiService;
use crate::pipeline::sanitize::{sanitize_user_input, MAX_MESSAGE_CHARS};
use crate::pipeline::triage::{build_analysis_request, validate_response, AnalysisError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Intake,
    CategoryBrowsing,
    Answering,
    /// Terminal until `reset`.
    Submitted,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Cannot {action} while in state {state:?}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error("{0} already in progress")]
    Busy(OperationKind),

    #[error("Session was reset while the request was in flight")]
    Superseded,

    #[error("Chat message is empty")]
    EmptyMessage,

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Outcome of one chat exchange. `fallback` is set when the service failed
/// and the fixed apology was appended instead.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub turn: ChatTurn,
    pub fallback: bool,
}

struct SessionInner {
    epoch: Uuid,
    state: SessionState,
    profile: Option<PatientProfile>,
    filter: CategoryFilter,
    flow: Option<QuestionFlow>,
    result: Option<ScreeningResult>,
    chat: Vec<ChatTurn>,
}

impl SessionInner {
    fn fresh() -> Self {
        Self {
            epoch: Uuid::new_v4(),
            state: SessionState::Intake,
            profile: None,
            filter: CategoryFilter::default(),
            flow: None,
            result: None,
            chat: Vec::new(),
        }
    }

    fn require(&self, action: &'static str, allowed: &[SessionState]) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    fn narrative(&self) -> Option<String> {
        let profile = self.profile.as_ref()?;
        let flow = self.flow.as_ref()?;
        Some(compile_narrative(
            profile,
            flow.category().label,
            flow.questions(),
            flow.answers(),
        ))
    }
}

/// A single screening session. Share it with `Arc`.
pub struct ScreeningSession {
    inner: RwLock<SessionInner>,
    gate: AiGate,
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SessionInner::fresh()),
            gate: AiGate::new(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionInner>, SessionError> {
        self.inner.read().map_err(|_| SessionError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionInner>, SessionError> {
        self.inner.write().map_err(|_| SessionError::LockPoisoned)
    }

    /// Answers are frozen while their narrative is with the analysis service.
    /// Check under the write lock, before touching the flow.
    fn ensure_analysis_idle(&self) -> Result<(), SessionError> {
        if self.gate.is_busy(OperationKind::Analysis) {
            Err(SessionError::Busy(OperationKind::Analysis))
        } else {
            Ok(())
        }
    }

    // ── Intake ──────────────────────────────────────────────

    /// Validate the intake form and open the category grid.
    ///
    /// An incomplete draft leaves the session in `Intake`.
    pub fn enter_browsing(&self, draft: &ProfileDraft) -> Result<PatientProfile, SessionError> {
        let mut inner = self.write()?;
        inner.require("enter category browsing", &[SessionState::Intake])?;

        let profile = draft.validate().map_err(|e| {
            tracing::debug!(missing = ?e.missing, "Intake blocked");
            e
        })?;

        inner.profile = Some(profile.clone());
        inner.state = SessionState::CategoryBrowsing;
        tracing::debug!(age = profile.age, "Intake accepted");
        Ok(profile)
    }

    /// Back to the intake form before a category is chosen.
    pub fn return_to_intake(&self) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        inner.require("return to intake", &[SessionState::CategoryBrowsing])?;
        inner.profile = None;
        inner.filter = CategoryFilter::default();
        inner.state = SessionState::Intake;
        Ok(())
    }

    // ── Category browsing ───────────────────────────────────

    pub fn set_search(&self, term: &str) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        inner.require(
            "search categories",
            &[SessionState::CategoryBrowsing, SessionState::Answering],
        )?;
        inner.filter.search_term = Some(term.to_string());
        Ok(())
    }

    /// Body-map click. Clicking the active region clears it.
    pub fn toggle_region(&self, region: BodyRegion) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        inner.require(
            "select a body region",
            &[SessionState::CategoryBrowsing, SessionState::Answering],
        )?;
        inner.filter.toggle_region(region);
        Ok(())
    }

    /// Categories matching the current filter, in catalog order.
    pub fn visible_categories(&self) -> Result<Vec<&'static CategoryFlow>, SessionError> {
        let inner = self.read()?;
        Ok(filter_categories(CATEGORY_FLOWS, &inner.filter))
    }

    /// Pick a category. Picking again (or a different one) starts over with
    /// no answers.
    pub fn select_category(&self, category_id: &str) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        self.ensure_analysis_idle()?;
        inner.require(
            "select a category",
            &[SessionState::CategoryBrowsing, SessionState::Answering],
        )?;

        let flow = QuestionFlow::start(category_id)?;
        let switched = inner.flow.is_some();
        tracing::info!(
            category = category_id,
            questions = flow.questions().len(),
            switched,
            "Category entered"
        );
        inner.flow = Some(flow);
        inner.state = SessionState::Answering;
        Ok(())
    }

    // ── Answering ───────────────────────────────────────────

    pub fn record_answer(&self, question_id: &str, value: &str) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        self.ensure_analysis_idle()?;
        inner.require("record an answer", &[SessionState::Answering])?;
        let state = inner.state;
        let flow = inner.flow.as_mut().ok_or(SessionError::InvalidState {
            action: "record an answer",
            state,
        })?;
        flow.record_answer(question_id, value)?;
        Ok(())
    }

    /// Clinical narrative compiled from the current answers.
    pub fn narrative(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.narrative())
    }

    pub fn intake_summary(&self) -> Result<Option<IntakeSummary>, SessionError> {
        Ok(self.read()?.flow.as_ref().map(QuestionFlow::summary))
    }

    /// Send the narrative for analysis.
    ///
    /// On success the session moves to `Submitted` and the chat is seeded
    /// with a welcome turn. On any failure it stays in `Answering` so the
    /// user can retry. A second call while one is pending is rejected.
    pub async fn submit_analysis(
        &self,
        service: &dyn AiService,
    ) -> Result<ScreeningResult, SessionError> {
        let _guard = self
            .gate
            .try_acquire(OperationKind::Analysis)
            .ok_or(SessionError::Busy(OperationKind::Analysis))?;

        let (epoch, narrative) = {
            let inner = self.read()?;
            inner.require("submit for analysis", &[SessionState::Answering])?;
            let narrative = inner.narrative().ok_or(SessionError::InvalidState {
                action: "submit for analysis",
                state: inner.state,
            })?;
            (inner.epoch, narrative)
        };

        tracing::info!(%epoch, narrative_len = narrative.len(), "Analysis submitted");
        let request = build_analysis_request(&narrative);
        let outcome = match service.generate(&request).await {
            Ok(raw) => validate_response(&raw).map_err(AnalysisError::from),
            Err(e) => Err(AnalysisError::from(e)),
        };

        let mut inner = self.write()?;
        if inner.epoch != epoch {
            tracing::info!(%epoch, "Discarding analysis result for reset session");
            return Err(SessionError::Superseded);
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    %epoch,
                    risk_level = %result.risk_level,
                    conditions = result.potential_conditions.len(),
                    "Analysis accepted"
                );
                inner.chat = vec![welcome_turn(&result)];
                inner.result = Some(result.clone());
                inner.state = SessionState::Submitted;
                Ok(result)
            }
            Err(e) => {
                match &e {
                    AnalysisError::Schema(reason) => {
                        tracing::warn!(%epoch, %reason, "Analysis response rejected")
                    }
                    AnalysisError::Transport(err) => {
                        tracing::warn!(%epoch, error = %err, "Analysis request failed")
                    }
                }
                Err(e.into())
            }
        }
    }

    // ── Chat ────────────────────────────────────────────────

    /// One follow-up exchange.
    ///
    /// The user turn is appended before the call. A failed call appends the
    /// fallback reply instead of returning an error.
    pub async fn send_chat_message(
        &self,
        service: &dyn AiService,
        message: &str,
    ) -> Result<ChatReply, SessionError> {
        let text = sanitize_user_input(message, MAX_MESSAGE_CHARS).text;
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let _guard = self
            .gate
            .try_acquire(OperationKind::Chat)
            .ok_or(SessionError::Busy(OperationKind::Chat))?;

        let (epoch, request) = {
            let mut inner = self.write()?;
            inner.require("send a chat message", &[SessionState::Submitted])?;
            let state = inner.state;
            let not_ready = || SessionError::InvalidState {
                action: "send a chat message",
                state,
            };

            let request = {
                let profile = inner.profile.as_ref().ok_or_else(not_ready)?;
                let flow = inner.flow.as_ref().ok_or_else(not_ready)?;
                let result = inner.result.as_ref().ok_or_else(not_ready)?;
                let narrative = inner.narrative().ok_or_else(not_ready)?;
                let context = ChatContext {
                    profile,
                    chief_complaint: flow.category().label,
                    narrative: &narrative,
                    result,
                };
                build_chat_request(&inner.chat, &text, &context)
            };

            let history = std::mem::take(&mut inner.chat);
            inner.chat = append_turn(history, ChatTurn::user(text.as_str()));
            (inner.epoch, request)
        };

        tracing::debug!(
            %epoch,
            history = request.history.len(),
            message_len = text.len(),
            "Chat turn sent"
        );
        let outcome = service.converse(&request).await;

        let mut inner = self.write()?;
        if inner.epoch != epoch {
            tracing::info!(%epoch, "Discarding chat reply for reset session");
            return Err(SessionError::Superseded);
        }

        let (turn, fallback) = match outcome {
            Ok(reply) => (ChatTurn::assistant(reply_or_default(reply)), false),
            Err(e) => {
                tracing::warn!(%epoch, error = %e, "Chat turn failed, appending fallback reply");
                (ChatTurn::assistant(FALLBACK_REPLY), true)
            }
        };

        let history = std::mem::take(&mut inner.chat);
        inner.chat = append_turn(history, turn.clone());
        Ok(ChatReply { turn, fallback })
    }

    // ── Reset ───────────────────────────────────────────────

    /// Discard everything and return to `Intake`. In-flight results that
    /// arrive later are dropped.
    pub fn reset(&self) -> Result<(), SessionError> {
        let mut inner = self.write()?;
        let previous = inner.epoch;
        *inner = SessionInner::fresh();
        tracing::info!(%previous, epoch = %inner.epoch, "Session reset");
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn state(&self) -> Result<SessionState, SessionError> {
        Ok(self.read()?.state)
    }

    pub fn epoch(&self) -> Result<Uuid, SessionError> {
        Ok(self.read()?.epoch)
    }

    pub fn profile(&self) -> Result<Option<PatientProfile>, SessionError> {
        Ok(self.read()?.profile.clone())
    }

    pub fn filter(&self) -> Result<CategoryFilter, SessionError> {
        Ok(self.read()?.filter.clone())
    }

    /// Snapshot of the current question flow and its answers.
    pub fn flow(&self) -> Result<Option<QuestionFlow>, SessionError> {
        Ok(self.read()?.flow.clone())
    }

    pub fn result(&self) -> Result<Option<ScreeningResult>, SessionError> {
        Ok(self.read()?.result.clone())
    }

    pub fn chat_history(&self) -> Result<Vec<ChatTurn>, SessionError> {
        Ok(self.read()?.chat.clone())
    }

    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.gate.is_busy(kind)
    }

    pub fn current_operation(&self, kind: OperationKind) -> Option<ActiveOperation> {
        self.gate.current_operation(kind)
    }
}
