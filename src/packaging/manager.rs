// Packaging session manager
//
// Holds at most one current session for a single operator. All mutation goes
// through `&mut self`; there is no shared or global instance.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::session::{PackagingSession, SessionStatus, Tool};

#[derive(Debug, Default)]
pub struct PackagingSessionManager {
    current: Option<PackagingSession>,
    error: Option<String>,
}

impl PackagingSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_session(&self) -> Option<&PackagingSession> {
        self.current.as_ref()
    }

    pub fn session_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a new session, replacing whatever session was current.
    pub fn start_packaging_session(
        &mut self,
        operator: &str,
        is_batch_mode: bool,
        batch_id: Option<String>,
    ) -> &PackagingSession {
        self.start_packaging_session_at(operator, is_batch_mode, batch_id, Utc::now())
    }

    pub fn start_packaging_session_at(
        &mut self,
        operator: &str,
        is_batch_mode: bool,
        batch_id: Option<String>,
        now: DateTime<Utc>,
    ) -> &PackagingSession {
        if let Some(previous) = &self.current {
            // The previous session is dropped, not merged or completed
            warn!(
                session_id = %previous.id,
                operator = %previous.operator,
                tools = previous.tools.len(),
                "Replacing unfinished packaging session"
            );
        }

        let session = PackagingSession::new(operator, is_batch_mode, batch_id, now);
        info!(
            session_id = %session.id,
            operator = %operator,
            batch_mode = is_batch_mode,
            "Packaging session started"
        );
        self.current.insert(session)
    }

    /// Clear the current session and hand it back to the caller.
    ///
    /// The returned session keeps its `active` status.
    pub fn end_packaging_session(&mut self) -> Option<PackagingSession> {
        let ended = self.current.take();
        if let Some(session) = &ended {
            info!(session_id = %session.id, tools = session.tools.len(), "Packaging session ended");
        }
        ended
    }

    pub fn add_tool_to_session(&mut self, tool_id: &str) {
        let Some(session) = self.active_session_mut() else {
            debug!(tool_id = %tool_id, "No active packaging session, ignoring scan");
            return;
        };
        session.tools.push(Tool::stub(tool_id));
        debug!(session_id = %session.id, tool_id = %tool_id, "Tool added to session");
    }

    pub fn remove_tool_from_session(&mut self, tool_id: &str) {
        let Some(session) = self.active_session_mut() else {
            return;
        };
        let Some(position) = session.tools.iter().rposition(|t| t.id == tool_id) else {
            return;
        };
        session.tools.remove(position);
        debug!(session_id = %session.id, tool_id = %tool_id, "Tool removed from session");
    }

    pub fn set_session_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_session_error(&mut self) {
        self.error = None;
    }

    fn active_session_mut(&mut self) -> Option<&mut PackagingSession> {
        self.current
            .as_mut()
            .filter(|s| s.status == SessionStatus::Active)
    }
}
