//! JSON-File Repository Implementation
//!
//! Clients and domain lists persist as two pretty-printed JSON arrays
//! (`clients.json`, `domains.json`) under the data directory. Every
//! operation is read-modify-write over the whole file: the files hold a
//! handful of household devices, so simplicity wins over anything clever.
//!
//! Ids are assigned on insert as `max existing id + 1`. A process-local
//! mutex serializes mutations; concurrent writers across processes get
//! last-write-wins, which is the documented store contract.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kernel::id::Id;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::application::config::PolicyConfig;
use crate::domain::entity::{client::Client, domain_list::DomainList};
use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::error::{PolicyError, PolicyResult};

/// Anything stored in an id-indexed JSON array
trait Identified {
    type Mark;

    fn id(&self) -> Option<Id<Self::Mark>>;
    fn set_id(&mut self, id: Id<Self::Mark>);
}

impl Identified for Client {
    type Mark = kernel::id::markers::Client;

    fn id(&self) -> Option<Id<Self::Mark>> {
        self.id
    }

    fn set_id(&mut self, id: Id<Self::Mark>) {
        self.id = Some(id);
    }
}

impl Identified for DomainList {
    type Mark = kernel::id::markers::DomainList;

    fn id(&self) -> Option<Id<Self::Mark>> {
        self.id
    }

    fn set_id(&mut self, id: Id<Self::Mark>) {
        self.id = Some(id);
    }
}

fn next_id<T: Identified>(items: &[T]) -> Id<T::Mark> {
    let max = items
        .iter()
        .filter_map(|item| item.id())
        .map(|id| id.as_u32())
        .max()
        .unwrap_or(0);
    Id::from_u32(max + 1)
}

fn position_of<T: Identified>(items: &[T], id: Id<T::Mark>) -> Option<usize> {
    items.iter().position(|item| item.id() == Some(id))
}

fn storage(err: impl std::fmt::Display) -> PolicyError {
    PolicyError::Storage(err.to_string())
}

/// JSON-file-backed store for both repositories
#[derive(Clone)]
pub struct JsonFileStore {
    clients_path: PathBuf,
    domains_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            clients_path: config.clients_json(),
            domains_path: config.domains_json(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn read_items<T: DeserializeOwned>(path: &Path) -> PolicyResult<Vec<T>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            // A store that does not exist yet is just empty.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(storage(err)),
        };
        serde_json::from_slice(&bytes).map_err(storage)
    }

    async fn write_items<T: Serialize>(path: &Path, items: &[T]) -> PolicyResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage)?;
        }
        let json = serde_json::to_vec_pretty(items).map_err(storage)?;
        tokio::fs::write(path, json).await.map_err(storage)
    }

    async fn find_item<T>(path: &Path, id: Id<T::Mark>) -> PolicyResult<Option<T>>
    where
        T: Identified + DeserializeOwned,
    {
        let mut items: Vec<T> = Self::read_items(path).await?;
        Ok(position_of(&items, id).map(|pos| items.swap_remove(pos)))
    }

    async fn insert_item<T>(&self, path: &Path, item: T) -> PolicyResult<T>
    where
        T: Identified + Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = Self::read_items(path).await?;

        let mut item = item;
        item.set_id(next_id(&items));
        items.push(item.clone());

        Self::write_items(path, &items).await?;
        Ok(item)
    }

    async fn replace_item<T>(&self, path: &Path, id: Id<T::Mark>, item: T) -> PolicyResult<Option<T>>
    where
        T: Identified + Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = Self::read_items(path).await?;

        let Some(pos) = position_of(&items, id) else {
            return Ok(None);
        };

        // The path id is authoritative, whatever the body carried.
        let mut item = item;
        item.set_id(id);
        items[pos] = item.clone();

        Self::write_items(path, &items).await?;
        Ok(Some(item))
    }

    async fn remove_item<T>(&self, path: &Path, id: Id<T::Mark>) -> PolicyResult<Option<T>>
    where
        T: Identified + Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = Self::read_items(path).await?;

        let Some(pos) = position_of(&items, id) else {
            return Ok(None);
        };
        let removed = items.remove(pos);

        Self::write_items(path, &items).await?;
        Ok(Some(removed))
    }
}

// ============================================================================
// Client Repository Implementation
// ============================================================================

impl ClientRepository for JsonFileStore {
    async fn list_clients(&self) -> PolicyResult<Vec<Client>> {
        Self::read_items(&self.clients_path).await
    }

    async fn find_client(&self, id: kernel::id::ClientId) -> PolicyResult<Option<Client>> {
        Self::find_item(&self.clients_path, id).await
    }

    async fn insert_client(&self, client: Client) -> PolicyResult<Client> {
        self.insert_item(&self.clients_path, client).await
    }

    async fn replace_client(
        &self,
        id: kernel::id::ClientId,
        client: Client,
    ) -> PolicyResult<Option<Client>> {
        self.replace_item(&self.clients_path, id, client).await
    }

    async fn remove_client(&self, id: kernel::id::ClientId) -> PolicyResult<Option<Client>> {
        self.remove_item(&self.clients_path, id).await
    }
}

// ============================================================================
// Domain List Repository Implementation
// ============================================================================

impl DomainListRepository for JsonFileStore {
    async fn list_domain_lists(&self) -> PolicyResult<Vec<DomainList>> {
        Self::read_items(&self.domains_path).await
    }

    async fn find_domain_list(
        &self,
        id: kernel::id::DomainListId,
    ) -> PolicyResult<Option<DomainList>> {
        Self::find_item(&self.domains_path, id).await
    }

    async fn insert_domain_list(&self, list: DomainList) -> PolicyResult<DomainList> {
        self.insert_item(&self.domains_path, list).await
    }

    async fn replace_domain_list(
        &self,
        id: kernel::id::DomainListId,
        list: DomainList,
    ) -> PolicyResult<Option<DomainList>> {
        self.replace_item(&self.domains_path, id, list).await
    }

    async fn remove_domain_list(
        &self,
        id: kernel::id::DomainListId,
    ) -> PolicyResult<Option<DomainList>> {
        self.remove_item(&self.domains_path, id).await
    }
}
