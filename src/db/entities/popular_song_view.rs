use sea_orm::entity::prelude::*;

/// Read-only projection over `vista_canciones_populares_por_pais`.
///
/// Songs whose album has no label have no country.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vista_canciones_populares_por_pais")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_cancion: i32,
    pub titulo_cancion: String,
    pub id_album: i32,
    pub titulo_album: String,
    pub id_artista: i32,
    pub nombre_artista: String,
    pub reproducciones: i64,
    pub id_pais: Option<i32>,
    pub nombre_pais: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
