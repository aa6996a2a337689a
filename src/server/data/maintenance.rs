//! Maintenance record data repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::maintenance::{MaintenanceDraft, MaintenanceRecord};

pub struct MaintenanceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MaintenanceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a permanent record.
    ///
    /// # Arguments
    /// - `draft` - Validated event fields
    /// - `completed_at` - Time the record was finalized
    pub async fn create(
        &self,
        draft: MaintenanceDraft,
        completed_at: DateTime<Utc>,
    ) -> Result<MaintenanceRecord, DbErr> {
        let entity = entity::maintenance_record::ActiveModel {
            car_id: ActiveValue::Set(draft.car_id),
            maintenance_type: ActiveValue::Set(draft.maintenance_type),
            description: ActiveValue::Set(draft.description),
            cost: ActiveValue::Set(draft.cost),
            date: ActiveValue::Set(draft.date),
            next_date: ActiveValue::Set(draft.next_date),
            mechanic: ActiveValue::Set(draft.mechanic),
            status: ActiveValue::Set(draft.status),
            notes: ActiveValue::Set(draft.notes),
            mileage: ActiveValue::Set(draft.mileage),
            receipt: ActiveValue::Set(draft.receipt),
            completed_at: ActiveValue::Set(completed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(MaintenanceRecord::from_entity(entity))
    }

    /// Gets a maintenance record by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<MaintenanceRecord>, DbErr> {
        let entity = entity::prelude::MaintenanceRecord::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(MaintenanceRecord::from_entity))
    }

    /// Gets all records, most recent service date first.
    pub async fn get_all(&self) -> Result<Vec<MaintenanceRecord>, DbErr> {
        let entities = entity::prelude::MaintenanceRecord::find()
            .order_by_desc(entity::maintenance_record::Column::Date)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(MaintenanceRecord::from_entity).collect())
    }

    /// Gets a vehicle's maintenance history, most recent service date first.
    ///
    /// # Arguments
    /// - `car_id`: ID of the vehicle
    ///
    /// # Returns
    /// - `Ok(Vec<MaintenanceRecord>)`: Records for the vehicle, empty if none
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_car(&self, car_id: i32) -> Result<Vec<MaintenanceRecord>, DbErr> {
        let entities = entity::prelude::MaintenanceRecord::find()
            .filter(entity::maintenance_record::Column::CarId.eq(car_id))
            .order_by_desc(entity::maintenance_record::Column::Date)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(MaintenanceRecord::from_entity).collect())
    }

    /// Replaces every event field of a record, keeping its completion time.
    ///
    /// # Returns
    /// - `Ok(None)` - No record with that id
    pub async fn update(
        &self,
        id: i32,
        draft: MaintenanceDraft,
    ) -> Result<Option<MaintenanceRecord>, DbErr> {
        let Some(existing) = entity::prelude::MaintenanceRecord::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::maintenance_record::ActiveModel = existing.into();
        active.car_id = ActiveValue::Set(draft.car_id);
        active.maintenance_type = ActiveValue::Set(draft.maintenance_type);
        active.description = ActiveValue::Set(draft.description);
        active.cost = ActiveValue::Set(draft.cost);
        active.date = ActiveValue::Set(draft.date);
        active.next_date = ActiveValue::Set(draft.next_date);
        active.mechanic = ActiveValue::Set(draft.mechanic);
        active.status = ActiveValue::Set(draft.status);
        active.notes = ActiveValue::Set(draft.notes);
        active.mileage = ActiveValue::Set(draft.mileage);
        active.receipt = ActiveValue::Set(draft.receipt);

        let entity = active.update(self.db).await?;

        Ok(Some(MaintenanceRecord::from_entity(entity)))
    }

    /// Deletes a maintenance record by ID
    ///
    /// # Returns
    /// - `Ok(true)`: Record deleted
    /// - `Ok(false)`: No record with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::MaintenanceRecord::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes every maintenance record of a vehicle.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of records removed
    /// - `Err(DbErr)`: Database error
    pub async fn delete_by_car(&self, car_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::MaintenanceRecord::delete_many()
            .filter(entity::maintenance_record::Column::CarId.eq(car_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
