use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pagos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_suscripcion: i32,
    pub id_usuario: i32,
    pub importe: f64,
    pub fecha_pago: Date,
    pub metodo_pago: String,
    pub estado: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscription::Entity",
        from = "Column::IdSuscripcion",
        to = "super::subscription::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Subscription,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::IdUsuario",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
