//! Database integration tests
//!
//! Exercises the schema owned by the migration crate:
//! - Entities can be created with all required fields
//! - Foreign key, unique and check constraints hold even without the API
//! - Seeded roles are present
//! - Both reporting views resolve their joins

use chrono::{Duration, Utc};
use music_catalog::db::entities::{
    playlist, playlist_song, popular_song_view, song, song_genre, PopularSongView, RevenueView,
    Role, SongGenre,
};
use music_catalog::test_utils::*;
use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};

#[tokio::test]
async fn test_roles_are_seeded() {
    let db = setup_test_db().await;

    let roles = Role::find().order_by_asc(music_catalog::db::entities::role::Column::Id).all(&db).await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| (r.id, r.nombre.as_str())).collect();

    assert_eq!(names, vec![(ADMIN_ROLE_ID, "administrador"), (USER_ROLE_ID, "usuario")]);
}

#[tokio::test]
async fn test_create_catalog_chain() {
    let db = setup_test_db().await;

    let country = create_test_country(&db, "Argentina").await;
    let label = create_test_label(&db, "Sony Music", country.id, 500.0).await;
    let artist = create_test_artist(&db, "Charly Garcia", 1200.0).await;
    let album = create_test_album(&db, artist.id, Some(label.id), "Clics Modernos").await;
    let song = create_test_song(&db, album.id, "Nos Siguen Pegando Abajo", 42).await;

    assert!(song.id > 0);
    assert_eq!(song.id_album, album.id);
    assert_eq!(album.id_artista, artist.id);
    assert_eq!(album.id_discografica, Some(label.id));
    assert_eq!(song.reproducciones, 42);
}

#[tokio::test]
async fn test_album_requires_valid_artist() {
    let db = setup_test_db().await;

    let result = music_catalog::db::entities::album::ActiveModel {
        titulo: Set("Huerfano".to_string()),
        anio_lanzamiento: Set(1990),
        id_artista: Set(99999),
        id_discografica: Set(None),
        imagen_portada: Set(None),
        duracion_total: Set(0),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(result.is_err(), "Should fail to create album with invalid id_artista");
}

#[tokio::test]
async fn test_artist_name_is_unique_in_storage() {
    let db = setup_test_db().await;
    create_test_artist(&db, "Fito Paez", 0.0).await;

    let duplicate = music_catalog::db::entities::artist::ActiveModel {
        nombre: Set("Fito Paez".to_string()),
        biografia: Set(None),
        imagen_url: Set(None),
        ingresos: Set(0.0),
        fecha_registro: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_song_duration_check_constraint() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Soda Stereo", 0.0).await;
    let album = create_test_album(&db, artist.id, None, "Signos").await;

    let result = song::ActiveModel {
        titulo: Set("Corta".to_string()),
        duracion_segundos: Set(99),
        id_album: Set(album.id),
        reproducciones: Set(0),
        likes: Set(0),
        fecha_agregada: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(result.is_err(), "Durations under 100 seconds must be rejected by storage");
}

#[tokio::test]
async fn test_playlist_active_flag_check_constraint() {
    let db = setup_test_db().await;
    let country = create_test_country(&db, "Chile").await;
    let user = create_test_user(&db, "ana@mail.com", country.id, USER_ROLE_ID).await;

    let result = playlist::ActiveModel {
        id_usuario: Set(user.id),
        titulo: Set("Favoritas".to_string()),
        cantidad_canciones: Set(0),
        fecha_creacion: Set(Utc::now().into()),
        fecha_eliminacion: Set(None),
        activo: Set(2),
        estado: Set("publica".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_deleting_song_cascades_associations() {
    let db = setup_test_db().await;
    let country = create_test_country(&db, "Uruguay").await;
    let user = create_test_user(&db, "leo@mail.com", country.id, USER_ROLE_ID).await;
    let artist = create_test_artist(&db, "Jaime Roos", 0.0).await;
    let album = create_test_album(&db, artist.id, None, "Brindis por Pierrot").await;
    let song = create_test_song(&db, album.id, "Durazno y Convencion", 5).await;
    let genre = create_test_genre(&db, "Candombe").await;
    let playlist = create_test_playlist(&db, user.id, "Montevideo").await;

    song_genre::ActiveModel {
        id_cancion: Set(song.id),
        id_genero: Set(genre.id),
    }
    .insert(&db)
    .await
    .unwrap();
    playlist_song::ActiveModel {
        id_playlist: Set(playlist.id),
        id_cancion: Set(song.id),
        fecha_agregada: Set(Utc::now().into()),
        orden: Set(Some(1)),
    }
    .insert(&db)
    .await
    .unwrap();

    song.delete(&db).await.unwrap();

    assert!(SongGenre::find().all(&db).await.unwrap().is_empty());
    assert!(playlist_song::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_revenue_view_sums_artist_and_label() {
    let db = setup_test_db().await;
    let country = create_test_country(&db, "Argentina").await;
    let label = create_test_label(&db, "DBN", country.id, 300.0).await;
    let artist = create_test_artist(&db, "Los Redondos", 700.0).await;
    // Two albums on the same label still produce a single row
    create_test_album(&db, artist.id, Some(label.id), "Oktubre").await;
    create_test_album(&db, artist.id, Some(label.id), "Bang! Bang!! Estas liquidado").await;

    let rows = RevenueView::find().all(&db).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].nombre_artista, "Los Redondos");
    assert_eq!(rows[0].nombre_discografica, "DBN");
    assert_eq!(rows[0].nombre_pais, "Argentina");
    assert_eq!(rows[0].total_ingresos, 1000.0);
}

#[tokio::test]
async fn test_popular_songs_view_uses_label_country() {
    let db = setup_test_db().await;
    let mexico = create_test_country(&db, "Mexico").await;
    let label = create_test_label(&db, "Warner Mexico", mexico.id, 0.0).await;
    let artist = create_test_artist(&db, "Cafe Tacvba", 0.0).await;
    let album = create_test_album(&db, artist.id, Some(label.id), "Re").await;
    create_test_song(&db, album.id, "La Ingrata", 900).await;
    // Albums without a label still show up, with no country
    let loose = create_test_album(&db, artist.id, None, "Demos").await;
    create_test_song(&db, loose.id, "Maqueta", 10).await;

    let rows = PopularSongView::find()
        .order_by_desc(popular_song_view::Column::Reproducciones)
        .all(&db)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].titulo_cancion, "La Ingrata");
    assert_eq!(rows[0].nombre_pais.as_deref(), Some("Mexico"));
    assert_eq!(rows[0].reproducciones, 900);
    assert_eq!(rows[1].titulo_cancion, "Maqueta");
    assert_eq!(rows[1].id_pais, None);
    assert_eq!(rows[1].nombre_pais, None);
}

#[tokio::test]
async fn test_subscription_business_fields_are_unique() {
    let db = setup_test_db().await;
    let country = create_test_country(&db, "Peru").await;
    let user = create_test_user(&db, "rosa@mail.com", country.id, USER_ROLE_ID).await;
    let kind = create_test_subscription_type(&db, "Premium").await;
    let start = Utc::now().date_naive() + Duration::days(1);
    let renewal = start + Duration::days(30);

    create_test_subscription(&db, user.id, kind.id, start, renewal, false).await;
    let again = music_catalog::db::entities::subscription::ActiveModel {
        id_usuario: Set(user.id),
        id_tipo_suscripcion: Set(kind.id),
        fecha_inicio: Set(start),
        fecha_renovacion: Set(renewal),
        activo: Set(false),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(again.is_err());
}
