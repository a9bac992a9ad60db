use events_models::Category;
use sql_connection::Migration;
use uuid::{Uuid, uuid};

pub const MIGRATIONS: [Migration; 3] = [
    Migration::new(
        "001_create_categories",
        include_str!("../migrations/001_create_categories.sql"),
    ),
    Migration::new(
        "002_create_events",
        include_str!("../migrations/002_create_events.sql"),
    ),
    Migration::new(
        "003_seed_categories",
        include_str!("../migrations/003_seed_categories.sql"),
    ),
];

const DEFAULT_CATEGORIES: [(Uuid, &str); 16] = [
    (uuid!("043c6f2a-adef-494b-9038-f8d7cdc154a8"), "Crafts & Hobbies"),
    (uuid!("13267c45-1219-4cea-ba4b-336b585dca96"), "Theater & Performing Arts"),
    (uuid!("14fa8c26-d45f-48a4-9fab-214558ef179a"), "Community & Local Events"),
    (uuid!("16b2d573-ad6f-460d-8db4-168a6fce6044"), "Festival"),
    (uuid!("207a467e-b44b-4c95-a0e9-f7e0ef66a455"), "Gaming & eSports"),
    (uuid!("58253062-17d0-48cd-8cb5-35ee499fb56d"), "Music"),
    (uuid!("7b536871-cc9f-491f-854d-289fefb93cc7"), "Food & Culinary"),
    (uuid!("7e95dcfb-2051-4983-bc68-e9adfeaa86d1"), "Health & Wellness"),
    (uuid!("8172ad1b-5298-48fd-a346-a4ed873484f3"), "Fashion"),
    (uuid!("915f321e-1ca7-4ebf-98c8-01e7f8188f68"), "Literature & Book Fairs"),
    (uuid!("987444d6-4256-4cc9-b76e-cb6c9be1875c"), "Outdoor & Activities"),
    (uuid!("a0b781b4-48fe-4331-b809-4ee25cb25301"), "Art & Design"),
    (uuid!("ad2ccfe4-54d3-44c7-a0a5-d25e692376f1"), "Sports & Fitness"),
    (uuid!("c585c7a6-c5ac-4f52-83c2-fbcf0274e257"), "History & Heritage"),
    (uuid!("db013c07-6c5d-4b7e-8d82-d2eab1a860f4"), "Film & Cinema"),
    (uuid!("e910e72c-3d6f-4f30-b271-9e7cf46862a0"), "Technology"),
];

/// The categories seeded by `003_seed_categories`, for stores that do not
/// run SQL migrations.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name)| Category {
            id: *id,
            name: (*name).to_string(),
        })
        .collect()
}
