// ── Persistence seam ──

use async_trait::async_trait;

use padron_api::{Persona, PersonaClient};

use crate::error::CoreError;

/// The four persistence calls the directory needs.
///
/// Object-safe so the directory can hold an `Arc<dyn PersonaStore>`;
/// tests swap in recording fakes.
#[async_trait]
pub trait PersonaStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Persona>, CoreError>;
    async fn create(&self, draft: &Persona) -> Result<Persona, CoreError>;
    async fn update(&self, id: &str, persona: &Persona) -> Result<Persona, CoreError>;
    async fn delete(&self, id: &str) -> Result<(), CoreError>;
}

/// Production store backed by the REST client.
pub struct HttpPersonaStore {
    client: PersonaClient,
}

impl HttpPersonaStore {
    pub fn new(client: PersonaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PersonaStore for HttpPersonaStore {
    async fn list(&self) -> Result<Vec<Persona>, CoreError> {
        Ok(self.client.list().await?)
    }

    async fn create(&self, draft: &Persona) -> Result<Persona, CoreError> {
        Ok(self.client.create(draft).await?)
    }

    async fn update(&self, id: &str, persona: &Persona) -> Result<Persona, CoreError> {
        Ok(self.client.update(id, persona).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.client.delete(id).await?)
    }
}
