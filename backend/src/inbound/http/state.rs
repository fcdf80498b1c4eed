//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLineCommand, FixtureLineQuery, FixtureUserRegistration, LineCommand, LineQuery,
    UserRegistration,
};

/// Dependency bundle for HTTP handlers.
///
/// Only the ports behind the six queue routes are carried. Directory lookups
/// (`DirectoryQuery`) have no route and stay a library-level API.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub line: Arc<dyn LineCommand>,
    pub line_query: Arc<dyn LineQuery>,
}

impl HttpState {
    /// Construct state from individual ports.
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        line: Arc<dyn LineCommand>,
        line_query: Arc<dyn LineQuery>,
    ) -> Self {
        Self {
            registration,
            line,
            line_query,
        }
    }

    /// Construct state where one service backs every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use waitline::domain::LineService;
    /// use waitline::domain::ports::{FixtureDirectoryRepository, FixtureLineRepository};
    /// use waitline::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(LineService::new(
    ///     Arc::new(FixtureDirectoryRepository),
    ///     Arc::new(FixtureLineRepository),
    /// ));
    /// let state = HttpState::from_service(service);
    /// let _line = state.line.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UserRegistration + LineCommand + LineQuery + 'static,
    {
        Self {
            registration: service.clone(),
            line: service.clone(),
            line_query: service,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureUserRegistration),
            Arc::new(FixtureLineCommand),
            Arc::new(FixtureLineQuery),
        )
    }
}
