use crate::{ResultEngine, Settings, SettingsPatch};

use super::Engine;

impl Engine {
    pub async fn settings(&self) -> ResultEngine<Settings> {
        Ok(self.store.load().await?.settings)
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> ResultEngine<Settings> {
        self.mutate(|snapshot| Ok(snapshot.update_settings(patch).clone()))
            .await
    }
}
