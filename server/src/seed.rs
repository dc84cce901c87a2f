use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::store::{self, Error};

struct SampleShow {
    title: &'static str,
    date: &'static str,
    time: &'static str,
    ticket_price: f64,
    description: &'static str,
}

const VENUES: [(&str, &str, &str, i32); 3] = [
    ("Madison Square Garden", "New York", "4 Pennsylvania Plaza", 20000),
    ("Blue Note", "New York", "131 W 3rd St", 300),
    ("Warehouse District", "Los Angeles", "Downtown LA", 1500),
];

const BANDS: [(&str, &str, &str, i32); 3] = [
    ("Thunder Strike", "Rock", "High-energy rock band", 2018),
    ("Midnight Ensemble", "Jazz", "Smooth jazz collective", 2015),
    ("Neon Circuits", "Electronic", "Electronic music pioneers", 2020),
];

const SHOWS: [SampleShow; 3] = [
    SampleShow {
        title: "Rock Legends Live",
        date: "2024-02-15",
        time: "20:00",
        ticket_price: 75.0,
        description: "An electrifying night of classic rock with legendary performances that will shake the venue to its core.",
    },
    SampleShow {
        title: "Jazz Under the Stars",
        date: "2024-02-20",
        time: "19:30",
        ticket_price: 45.0,
        description: "Smooth jazz melodies under the moonlight with world-class musicians creating magical moments.",
    },
    SampleShow {
        title: "Electronic Pulse",
        date: "2024-02-25",
        time: "21:00",
        ticket_price: 60.0,
        description: "Cutting-edge electronic music with mind-bending visuals and bass that you'll feel in your soul.",
    },
];

const REVIEWS: [&str; 2] = [
    "Absolutely incredible! The energy was off the charts and the sound quality was perfect.",
    "Pure magic! The atmosphere was perfect and the musicians were world-class.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub shows: u64,
    pub bands: u64,
    pub venues: u64,
    pub reviews: u64,
}

/// Inserts three venues, each hosting one show headlined by one band, and a
/// user who reviewed the first two shows.
pub async fn run<C>(db: &C) -> Result<Counts, Error>
where
    C: ConnectionTrait,
{
    let mut venues = Vec::new();
    for (name, city, address, capacity) in VENUES {
        let active = entity::VenueActive {
            name: ActiveValue::Set(name.to_string()),
            city: ActiveValue::Set(Some(city.to_string())),
            address: ActiveValue::Set(Some(address.to_string())),
            capacity: ActiveValue::Set(Some(capacity)),
            ..Default::default()
        };
        venues.push(store::create(db, active).await?);
    }

    let mut bands = Vec::new();
    for (name, genre, description, formed_year) in BANDS {
        let active = entity::BandActive {
            name: ActiveValue::Set(name.to_string()),
            genre: ActiveValue::Set(Some(genre.to_string())),
            description: ActiveValue::Set(Some(description.to_string())),
            formed_year: ActiveValue::Set(Some(formed_year)),
            ..Default::default()
        };
        bands.push(store::create(db, active).await?);
    }

    let mut shows = Vec::new();
    for (sample, venue) in SHOWS.iter().zip(venues.iter()) {
        let active = entity::ShowActive {
            title: ActiveValue::Set(Some(sample.title.to_string())),
            date: ActiveValue::Set(Some(sample.date.to_string())),
            time: ActiveValue::Set(Some(sample.time.to_string())),
            ticket_price: ActiveValue::Set(Some(sample.ticket_price)),
            description: ActiveValue::Set(Some(sample.description.to_string())),
            venue_id: ActiveValue::Set(Some(venue.id)),
            ..Default::default()
        };
        shows.push(store::create(db, active).await?);
    }

    for (show, band) in shows.iter().zip(bands.iter()) {
        store::link_band(db, show.id, band.id, Some(1)).await?;
    }

    let user = store::create(
        db,
        entity::UserActive {
            username: ActiveValue::Set("musicfan".to_string()),
            email: ActiveValue::Set(Some("fan@music.com".to_string())),
            first_name: ActiveValue::Set(Some("Music".to_string())),
            last_name: ActiveValue::Set(Some("Fan".to_string())),
            ..Default::default()
        },
    )
    .await?;

    for (comment, show) in REVIEWS.iter().zip(shows.iter()) {
        let active = entity::ReviewActive {
            rating: ActiveValue::Set(5),
            comment: ActiveValue::Set(Some(comment.to_string())),
            user_id: ActiveValue::Set(Some(user.id)),
            show_id: ActiveValue::Set(Some(show.id)),
            ..Default::default()
        };
        store::create(db, active).await?;
    }

    let counts = Counts {
        shows: entity::ShowEntity::find().count(db).await?,
        bands: entity::BandEntity::find().count(db).await?,
        venues: entity::VenueEntity::find().count(db).await?,
        reviews: entity::ReviewEntity::find().count(db).await?,
    };
    tracing::info!(
        shows = counts.shows,
        bands = counts.bands,
        venues = counts.venues,
        reviews = counts.reviews,
        "Sample data created"
    );
    Ok(counts)
}
