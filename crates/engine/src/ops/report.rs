use crate::{Report, ResultEngine, build_report};

use super::Engine;

impl Engine {
    /// Compute balances and settling payments from the current snapshot.
    ///
    /// Fails with [`NoParticipants`](crate::EngineError::NoParticipants) for an
    /// empty group.
    pub async fn report(&self) -> ResultEngine<Report> {
        let snapshot = self.store.load().await?;
        build_report(&snapshot.participants, &snapshot.expenses)
    }
}
