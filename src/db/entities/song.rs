use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "canciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub titulo: String,
    pub duracion_segundos: i32,
    pub id_album: i32,
    pub reproducciones: i64,
    pub likes: i64,
    pub fecha_agregada: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::album::Entity",
        from = "Column::IdAlbum",
        to = "super::album::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Album,
    #[sea_orm(has_many = "super::song_genre::Entity")]
    SongGenres,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::song_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SongGenres.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::song_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::song_genre::Relation::Song.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
