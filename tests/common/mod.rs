#![allow(dead_code)]

pub mod trip_entity;
pub mod user_entity;

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Set,
};
use uuid::Uuid;

/// Fresh in-memory SQLite database with the fixture tables created.
pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(user_entity::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(trip_entity::Entity)))
        .await?;
    Ok(db)
}

pub async fn insert_user(
    db: &DatabaseConnection,
    email: &str,
    age: i32,
    score: i32,
    active: bool,
    profile: serde_json::Value,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    user_entity::ActiveModel {
        id: Set(id),
        email: Set(email.to_owned()),
        age: Set(age),
        score: Set(score),
        active: Set(active),
        profile: Set(profile.to_string()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

pub async fn insert_trip(
    db: &DatabaseConnection,
    user_id: Uuid,
    title: &str,
    days: i32,
    stats: serde_json::Value,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    trip_entity::ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        title: Set(title.to_owned()),
        days: Set(days),
        stats: Set(stats.to_string()),
    }
    .insert(db)
    .await?;
    Ok(id)
}
