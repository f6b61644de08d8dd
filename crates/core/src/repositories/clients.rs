//! Client (pet owner) record management.
//!
//! Clients are stored as JSON files in a sharded structure under
//! `practice_data/clients/`. The sharded directory name is an internal record
//! id; the client's identity is the RUT inside the record, and this service
//! enforces that at most one record exists per RUT.
//!
//! ## Pure data operations
//!
//! This module contains **only** data operations — no API concerns such as
//! HTTP servers or request parsing. API-level logic belongs in `api-rest`.

use crate::client::Client;
use crate::config::CoreConfig;
use crate::constants::CLIENT_JSON_FILENAME;
use crate::error::{PracticeError, PracticeResult};
use crate::repositories::shared::{
    create_unique_record_dir, remove_record_dir, scan_json_records, write_json_record,
};
use crate::repositories::PetService;
use crate::uuid::ShardableUuid;
use std::path::PathBuf;
use std::sync::Arc;
use vetpr_types::Rut;

/// Service for managing client records.
#[derive(Clone, Debug)]
pub struct ClientService {
    cfg: Arc<CoreConfig>,
}

impl ClientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Registers a new client.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::DuplicateRut`] if a client with the same RUT
    /// already exists, or a storage error if writing fails.
    pub fn register(&self, client: Client) -> PracticeResult<()> {
        if self.locate(&client.rut).is_some() {
            return Err(PracticeError::DuplicateRut(client.rut.to_string()));
        }

        let clients_dir = self.cfg.clients_dir();
        std::fs::create_dir_all(&clients_dir).map_err(PracticeError::StorageDirCreation)?;

        let (_, record_dir) = create_unique_record_dir(&clients_dir, ShardableUuid::new)?;
        write_json_record(&record_dir.join(CLIENT_JSON_FILENAME), &client)?;

        tracing::info!("registered client {} ({})", client.name, client.rut);
        Ok(())
    }

    /// Lists all clients. Order is not guaranteed.
    pub fn list(&self) -> Vec<Client> {
        scan_json_records(&self.cfg.clients_dir(), CLIENT_JSON_FILENAME)
            .into_iter()
            .map(|(_, client)| client)
            .collect()
    }

    /// Finds the client registered under `rut`, if any.
    pub fn find(&self, rut: &Rut) -> Option<Client> {
        self.locate(rut).map(|(_, client)| client)
    }

    /// Updates the client registered under `rut`.
    ///
    /// A RUT change re-keys the record: the new RUT must not collide with
    /// another client.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownClient`] if no client exists under
    /// `rut`, or [`PracticeError::DuplicateRut`] if the updated RUT belongs to
    /// someone else.
    pub fn update(&self, rut: &Rut, updated: Client) -> PracticeResult<()> {
        let (record_dir, _) = self
            .locate(rut)
            .ok_or_else(|| PracticeError::UnknownClient(rut.to_string()))?;

        if updated.rut != *rut && self.locate(&updated.rut).is_some() {
            return Err(PracticeError::DuplicateRut(updated.rut.to_string()));
        }

        write_json_record(&record_dir.join(CLIENT_JSON_FILENAME), &updated)?;
        tracing::info!("updated client {} -> {}", rut, updated.rut);
        Ok(())
    }

    /// Removes the client registered under `rut`.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownClient`] if no such client exists, or
    /// [`PracticeError::ClientHasPets`] while pets still reference the owner —
    /// pets must be removed (or re-homed) first.
    pub fn remove(&self, rut: &Rut) -> PracticeResult<()> {
        let (record_dir, _) = self
            .locate(rut)
            .ok_or_else(|| PracticeError::UnknownClient(rut.to_string()))?;

        let pets = PetService::new(Arc::clone(&self.cfg));
        if !pets.list_for_owner(rut).is_empty() {
            return Err(PracticeError::ClientHasPets(rut.to_string()));
        }

        remove_record_dir(&record_dir)?;
        tracing::info!("removed client {rut}");
        Ok(())
    }

    /// Finds the record directory and content for `rut`.
    fn locate(&self, rut: &Rut) -> Option<(PathBuf, Client)> {
        let clients_dir = self.cfg.clients_dir();
        scan_json_records::<Client>(&clients_dir, CLIENT_JSON_FILENAME)
            .into_iter()
            .find(|(_, client)| client.rut == *rut)
            .and_then(|(id, client)| {
                let dir = ShardableUuid::parse(&id).ok()?.sharded_dir(&clients_dir);
                Some((dir, client))
            })
    }
}
