use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_REVENUE_VIEW: &str = r#"
CREATE VIEW vista_ingresos_artista_discografica AS
SELECT DISTINCT
    a.id AS id_artista,
    a.nombre AS nombre_artista,
    a.ingresos AS ingresos_artista,
    d.id AS id_discografica,
    d.nombre AS nombre_discografica,
    d.ingresos AS ingresos_discografica,
    p.id AS id_pais,
    p.nombre AS nombre_pais,
    (a.ingresos + d.ingresos) AS total_ingresos
FROM artistas a
INNER JOIN albumes al ON al.id_artista = a.id
INNER JOIN discograficas d ON d.id = al.id_discografica
INNER JOIN paises p ON p.id = d.id_pais
"#;

const CREATE_POPULAR_SONGS_VIEW: &str = r#"
CREATE VIEW vista_canciones_populares_por_pais AS
SELECT
    c.id AS id_cancion,
    c.titulo AS titulo_cancion,
    al.id AS id_album,
    al.titulo AS titulo_album,
    a.id AS id_artista,
    a.nombre AS nombre_artista,
    c.reproducciones AS reproducciones,
    p.id AS id_pais,
    p.nombre AS nombre_pais
FROM canciones c
INNER JOIN albumes al ON al.id = c.id_album
INNER JOIN artistas a ON a.id = al.id_artista
LEFT JOIN discograficas d ON d.id = al.id_discografica
LEFT JOIN paises p ON p.id = d.id_pais
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CREATE_REVENUE_VIEW).await?;
        db.execute_unprepared(CREATE_POPULAR_SONGS_VIEW).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP VIEW IF EXISTS vista_canciones_populares_por_pais")
            .await?;
        db.execute_unprepared("DROP VIEW IF EXISTS vista_ingresos_artista_discografica")
            .await?;
        Ok(())
    }
}
