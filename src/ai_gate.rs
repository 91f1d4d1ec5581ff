//! Single-outstanding-request gate for AI service calls.
//!
//! Each `OperationKind` has its own slot. `try_acquire` never waits: a second
//! submission while one is in flight gets `None` and must be rejected by the
//! caller, never queued. The guard is owned so it can be held across `.await`.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// What kind of AI request is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// One-shot structured screening analysis
    Analysis,
    /// Follow-up chat exchange
    Chat,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analysis => write!(f, "Screening analysis"),
            Self::Chat => write!(f, "Chat reply"),
        }
    }
}

/// Snapshot of an in-flight request.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveOperation {
    pub kind: OperationKind,
    /// When the request started (ISO 8601).
    pub started_at: String,
}

// ═══════════════════════════════════════════════════════════
// AiGate
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    current: Arc<Mutex<Option<ActiveOperation>>>,
}

/// Per-session access controller for the AI service.
#[derive(Default)]
pub struct AiGate {
    analysis: Slot,
    chat: Slot,
}

impl AiGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: OperationKind) -> &Slot {
        match kind {
            OperationKind::Analysis => &self.analysis,
            OperationKind::Chat => &self.chat,
        }
    }

    /// Claim the slot for `kind` without waiting.
    ///
    /// Returns `None` if a request of that kind is already in flight. Hold
    /// the guard until the response has been applied.
    pub fn try_acquire(&self, kind: OperationKind) -> Option<AiGuard> {
        let slot = self.slot(kind);
        let guard = Arc::clone(&slot.lock).try_lock_owned().ok()?;
        if let Ok(mut current) = slot.current.lock() {
            *current = Some(ActiveOperation {
                kind,
                started_at: chrono::Utc::now().to_rfc3339(),
            });
        }
        Some(AiGuard {
            _guard: guard,
            current: Arc::clone(&slot.current),
        })
    }

    /// The in-flight request of `kind`, if any.
    pub fn current_operation(&self, kind: OperationKind) -> Option<ActiveOperation> {
        self.slot(kind).current.lock().ok()?.clone()
    }

    /// Reads the in-flight record. Never touches the slot lock.
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.current_operation(kind).is_some()
    }
}

// ═══════════════════════════════════════════════════════════
// AiGuard: RAII in-flight token
// ═══════════════════════════════════════════════════════════

/// Dropping the guard frees the slot and clears the current operation.
pub struct AiGuard {
    _guard: OwnedMutexGuard<()>,
    current: Arc<Mutex<Option<ActiveOperation>>>,
}

impl Drop for AiGuard {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
    }
}
