mod band;
mod musician;
mod review;
mod show;
mod show_band;
mod user;
mod venue;

pub use band::ActiveModel as BandActive;
pub use band::Column as BandColumn;
pub use band::Entity as BandEntity;
pub use band::Model as Band;
pub use musician::ActiveModel as MusicianActive;
pub use musician::Column as MusicianColumn;
pub use musician::Entity as MusicianEntity;
pub use musician::Model as Musician;
pub use review::ActiveModel as ReviewActive;
pub use review::Column as ReviewColumn;
pub use review::Entity as ReviewEntity;
pub use review::Model as Review;
pub use show::ActiveModel as ShowActive;
pub use show::Column as ShowColumn;
pub use show::Entity as ShowEntity;
pub use show::Model as Show;
pub use user::ActiveModel as UserActive;
pub use user::Column as UserColumn;
pub use user::Entity as UserEntity;
pub use user::Model as User;
pub use venue::ActiveModel as VenueActive;
pub use venue::Column as VenueColumn;
pub use venue::Entity as VenueEntity;
pub use venue::Model as Venue;

pub use show_band::ActiveModel as ShowBandActive;
pub use show_band::Column as ShowBandColumn;
pub use show_band::Entity as ShowBandEntity;
pub use show_band::Model as ShowBand;
