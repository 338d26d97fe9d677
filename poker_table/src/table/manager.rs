//! Table manager for spawning and managing multiple table actors.

use log::info;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    TableId,
    actor::{TableActor, TableHandle},
    config::TableConfig,
    errors::TableError,
    messages::TableMetadata,
};

/// Table manager for managing multiple table instances
#[derive(Clone, Debug, Default)]
pub struct TableManager {
    /// Active table handles
    tables: Arc<RwLock<HashMap<TableId, (TableHandle, TableMetadata)>>>,
}

impl TableManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and spawn a table actor for it.
    pub async fn create_table(&self, config: TableConfig) -> Result<TableId, TableError> {
        config.validate()?;

        let (actor, handle) = TableActor::new(config.clone());
        let table_id = handle.table_id();
        let metadata = TableMetadata {
            id: table_id,
            name: config.name,
            max_players: config.max_players,
            small_blind: config.settings.small_blind,
            big_blind: config.settings.big_blind,
        };

        let mut tables = self.tables.write().await;
        tables.insert(table_id, (handle, metadata));
        drop(tables);

        tokio::spawn(async move {
            actor.run().await;
        });

        info!("created and spawned table {table_id}");
        Ok(table_id)
    }

    pub async fn get_table(&self, table_id: TableId) -> Option<TableHandle> {
        let tables = self.tables.read().await;
        tables.get(&table_id).map(|(handle, _)| handle.clone())
    }

    /// List all active tables, sorted by name
    pub async fn list_tables(&self) -> Vec<TableMetadata> {
        let tables = self.tables.read().await;
        let mut list: Vec<TableMetadata> =
            tables.values().map(|(_, metadata)| metadata.clone()).collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        list
    }

    /// Close a table and forget about it
    pub async fn close_table(&self, table_id: TableId) -> Result<(), TableError> {
        let mut tables = self.tables.write().await;
        let (handle, _) = tables
            .remove(&table_id)
            .ok_or(TableError::NotFound(table_id))?;
        drop(tables);

        // An actor that already stopped is as closed as it gets.
        match handle.close().await {
            Ok(_) | Err(TableError::Closed) => {}
            Err(error) => return Err(error),
        }

        info!("closed table {table_id}");
        Ok(())
    }

    pub async fn active_table_count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.len()
    }
}
