pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_reference_tables;
mod m20240101_000002_create_artists_table;
mod m20240101_000003_create_albums_table;
mod m20240101_000004_create_songs_table;
mod m20240101_000005_create_genres_tables;
mod m20240101_000006_create_users_table;
mod m20240101_000007_create_playlists_tables;
mod m20240101_000008_create_billing_tables;
mod m20240101_000009_create_reporting_views;
mod m20240101_000010_seed_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reference_tables::Migration),
            Box::new(m20240101_000002_create_artists_table::Migration),
            Box::new(m20240101_000003_create_albums_table::Migration),
            Box::new(m20240101_000004_create_songs_table::Migration),
            Box::new(m20240101_000005_create_genres_tables::Migration),
            Box::new(m20240101_000006_create_users_table::Migration),
            Box::new(m20240101_000007_create_playlists_tables::Migration),
            Box::new(m20240101_000008_create_billing_tables::Migration),
            Box::new(m20240101_000009_create_reporting_views::Migration),
            Box::new(m20240101_000010_seed_roles::Migration),
        ]
    }
}
