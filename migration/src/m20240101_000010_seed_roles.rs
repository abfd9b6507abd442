use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_reference_tables::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Role ids are referenced by `DEFAULT_ROLE_ID`, keep them stable.
const ROLES: [(i32, &str); 2] = [(1, "administrador"), (2, "usuario")];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Roles::Table)
            .columns([Roles::Id, Roles::Nombre]);
        for (id, nombre) in ROLES {
            insert.values_panic([id.into(), nombre.into()]);
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Roles::Table)
            .and_where(Expr::col(Roles::Id).is_in(ROLES.map(|(id, _)| id)))
            .to_owned();
        manager.exec_stmt(delete).await
    }
}
