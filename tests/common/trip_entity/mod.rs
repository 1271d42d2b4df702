use async_trait::async_trait;
use searchcrate::SearchableResource;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub days: i32,
    /// JSON document stored as text
    #[sea_orm(column_type = "Text")]
    pub stats: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_entity::Entity",
        from = "Column::UserId",
        to = "super::user_entity::Column::Id"
    )]
    Users,
}

impl Related<super::user_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub days: i32,
    pub stats: String,
}

impl From<Model> for Trip {
    fn from(model: Model) -> Self {
        Trip {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            days: model.days,
            stats: model.stats,
        }
    }
}

#[async_trait]
impl SearchableResource for Trip {
    type EntityType = Entity;

    const ENTITY_NAME: &'static str = "trips";

    fn allowed_fields() -> Vec<&'static str> {
        vec!["id", "user_id", "title", "days", "stats"]
    }
}
