use async_trait::async_trait;
use searchcrate::{JoinedRelation, SearchableResource};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub email: String,
    pub age: i32,
    pub score: i32,
    pub active: bool,
    /// JSON document stored as text
    #[sea_orm(column_type = "Text")]
    pub profile: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trip_entity::Entity")]
    Trips,
}

impl Related<super::trip_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub age: i32,
    pub score: i32,
    pub active: bool,
    pub profile: String,
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            age: model.age,
            score: model.score,
            active: model.active,
            profile: model.profile,
        }
    }
}

#[async_trait]
impl SearchableResource for User {
    type EntityType = Entity;

    const ENTITY_NAME: &'static str = "users";

    fn allowed_fields() -> Vec<&'static str> {
        vec!["id", "email", "age", "score", "active", "profile"]
    }

    fn joined_relations() -> Vec<JoinedRelation> {
        vec![JoinedRelation {
            name: "trips",
            def: || Relation::Trips.def(),
        }]
    }
}
