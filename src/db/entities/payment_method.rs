use sea_orm::entity::prelude::*;

/// Stored payment method. `numero_tarjeta` only ever holds the masked form;
/// responses go through `PaymentMethodResponse`, which also drops `cvc`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "metodos_pago")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_usuario: i32,
    pub tipo_pago: String,
    pub cbu: Option<String>,
    pub numero_tarjeta: Option<String>,
    pub mes_caducidad: Option<i32>,
    pub anio_caducidad: Option<i32>,
    pub cvc: Option<String>,
    pub fecha_creacion: DateTimeWithTimeZone,
    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::IdUsuario",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
