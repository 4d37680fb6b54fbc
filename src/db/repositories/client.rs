use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::clients;

/// Fields accepted when creating a client record.
#[derive(Debug, Clone)]
pub struct ClientInput {
    pub name: String,
    pub phone_number: Option<String>,
    pub contact_details: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; only present fields are overwritten.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub contact_details: Option<String>,
    pub notes: Option<String>,
}

pub struct ClientRepository {
    conn: DatabaseConnection,
}

impl ClientRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List all clients, or those whose name or contact details contain the
    /// search term (substring LIKE match, OR across the two fields).
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<clients::Model>> {
        let mut query = clients::Entity::find().order_by_asc(clients::Column::Name);

        if let Some(term) = search {
            query = query.filter(
                Condition::any()
                    .add(clients::Column::Name.contains(term))
                    .add(clients::Column::ContactDetails.contains(term)),
            );
        }

        query.all(&self.conn).await.context("Failed to list clients")
    }

    pub async fn get(&self, id: i32) -> Result<Option<clients::Model>> {
        clients::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query client by ID")
    }

    pub async fn create(&self, input: ClientInput) -> Result<clients::Model> {
        let active = clients::ActiveModel {
            name: Set(input.name),
            phone_number: Set(input.phone_number),
            contact_details: Set(input.contact_details),
            notes: Set(input.notes),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert client")?;

        info!("Added client {} ({})", model.name, model.id);
        Ok(model)
    }

    /// Overwrite the provided fields. Returns `None` if the id is absent.
    pub async fn update(&self, id: i32, update: ClientUpdate) -> Result<Option<clients::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: clients::ActiveModel = existing.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(phone) = update.phone_number {
            active.phone_number = Set(Some(phone));
        }
        if let Some(contact) = update.contact_details {
            active.contact_details = Set(Some(contact));
        }
        if let Some(notes) = update.notes {
            active.notes = Set(Some(notes));
        }

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update client")?;

        Ok(Some(model))
    }
}
