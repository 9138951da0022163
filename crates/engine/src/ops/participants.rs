use crate::{ResultEngine, ledger::RemovedParticipant};

use super::Engine;

impl Engine {
    /// Current participants, in order.
    pub async fn participants(&self) -> ResultEngine<Vec<String>> {
        Ok(self.store.load().await?.participants)
    }

    /// Replace the participant list.
    ///
    /// Expenses paid by anyone who is no longer listed are dropped.
    pub async fn set_participants(&self, names: Vec<String>) -> ResultEngine<Vec<String>> {
        self.mutate(|snapshot| Ok(snapshot.set_participants(names).to_vec()))
            .await
    }

    pub async fn rename_participant(&self, old: &str, new: &str) -> ResultEngine<Vec<String>> {
        self.mutate(|snapshot| snapshot.rename_participant(old, new).map(<[String]>::to_vec))
            .await
    }

    /// Remove a participant and the expenses they paid.
    ///
    /// Returns the removed data, which can be handed to
    /// [`restore_participant`](Engine::restore_participant) to undo the removal,
    /// and the participants left after this very write.
    pub async fn delete_participant(
        &self,
        name: &str,
    ) -> ResultEngine<(RemovedParticipant, Vec<String>)> {
        self.mutate(|snapshot| {
            let removed = snapshot.delete_participant(name)?;
            Ok((removed, snapshot.participants.clone()))
        })
        .await
    }
}
