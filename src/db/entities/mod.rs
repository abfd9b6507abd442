pub mod album;
pub mod artist;
pub mod country;
pub mod genre;
pub mod label;
pub mod payment;
pub mod payment_method;
pub mod playlist;
pub mod playlist_song;
pub mod popular_song_view;
pub mod revenue_view;
pub mod role;
pub mod song;
pub mod song_genre;
pub mod subscription;
pub mod subscription_type;
pub mod user;

pub use album::Entity as Album;
pub use artist::Entity as Artist;
pub use country::Entity as Country;
pub use genre::Entity as Genre;
pub use label::Entity as Label;
pub use payment::Entity as Payment;
pub use payment_method::Entity as PaymentMethod;
pub use playlist::Entity as Playlist;
pub use playlist_song::Entity as PlaylistSong;
pub use popular_song_view::Entity as PopularSongView;
pub use revenue_view::Entity as RevenueView;
pub use role::Entity as Role;
pub use song::Entity as Song;
pub use song_genre::Entity as SongGenre;
pub use subscription::Entity as Subscription;
pub use subscription_type::Entity as SubscriptionType;
pub use user::Entity as User;
