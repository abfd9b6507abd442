use sea_orm::entity::prelude::*;

/// Read-only projection over `vista_ingresos_artista_discografica`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vista_ingresos_artista_discografica")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_artista: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_discografica: i32,
    pub nombre_artista: String,
    pub ingresos_artista: f64,
    pub nombre_discografica: String,
    pub ingresos_discografica: f64,
    pub id_pais: i32,
    pub nombre_pais: String,
    pub total_ingresos: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
