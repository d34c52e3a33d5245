//! One-shot database populator
//!
//! Clears and repopulates the locations reference table and the sample
//! venue listings. Run after migrations on a fresh database:
//!
//! ```text
//! cargo run --bin seed
//! ```

use tracing::info;

use venuehub::config::Settings;
use venuehub::database::{connection, DatabaseService};
use venuehub::models::location::CreateLocationRequest;
use venuehub::models::venue::CreateVenueRequest;

/// Indian states and major cities
const LOCATIONS_DATA: &[(&str, &[&str])] = &[
    ("Andhra Pradesh", &["Visakhapatnam", "Vijayawada", "Guntur"]),
    ("Karnataka", &["Bengaluru", "Mysuru", "Mangaluru", "Hubli"]),
    (
        "Kerala",
        &[
            "Thiruvananthapuram",
            "Kochi",
            "Kozhikode",
            "Thrissur",
            "Kollam",
            "Kannur",
            "Kottayam",
            "Alappuzha",
            "Palakkad",
            "Pathanamthitta",
            "Idukki",
            "Wayanad",
            "Kasaragod",
            "Malappuram",
            "Ernakulam",
        ],
    ),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur"]),
    (
        "Tamil Nadu",
        &["Chennai", "Coimbatore", "Madurai", "Salem", "Tiruchirappalli", "Tirunelveli", "Vellore"],
    ),
    ("Gujarat", &["Ahmedabad", "Surat", "Vadodara"]),
    ("Rajasthan", &["Jaipur"]),
    ("West Bengal", &["Kolkata", "Siliguri", "Durgapur"]),
    (
        "Uttar Pradesh",
        &[
            "Lucknow",
            "Kanpur",
            "Agra",
            "Varanasi",
            "Allahabad",
            "Bareilly",
            "Aligarh",
            "Moradabad",
            "Saharanpur",
            "Gorakhpur",
            "Firozabad",
            "Meerut",
        ],
    ),
    ("Telangana", &["Hyderabad", "Warangal"]),
    ("Punjab", &["Amritsar", "Ludhiana"]),
    ("Haryana", &["Gurugram", "Faridabad", "Panipat", "Ambala"]),
    ("Delhi", &["Delhi"]),
    ("Himachal Pradesh", &["Shimla", "Manali", "Dharamshala"]),
    ("Bihar", &["Patna", "Gaya", "Muzaffarpur"]),
    ("Jharkhand", &["Ranchi", "Jamshedpur", "Dhanbad"]),
    ("Odisha", &["Bhubaneswar", "Cuttack"]),
    ("Assam", &["Guwahati"]),
    ("Madhya Pradesh", &["Bhopal", "Indore"]),
    ("Goa", &["Goa"]),
    ("Chandigarh", &["Chandigarh"]),
];

fn sample_venues() -> Vec<CreateVenueRequest> {
    let venue = |name: &str,
                 venue_type: &str,
                 location: &str,
                 city: &str,
                 price: &str,
                 rating: f64,
                 reviews: i32,
                 image: &str,
                 suitability: &[&str],
                 badges: &[&str]| CreateVenueRequest {
        name: name.to_string(),
        venue_type: venue_type.to_string(),
        location: location.to_string(),
        city: city.to_string(),
        price: price.to_string(),
        rating: Some(rating),
        reviews: Some(reviews),
        image: image.to_string(),
        suitability: Some(suitability.iter().map(|s| s.to_string()).collect()),
        badges: Some(badges.iter().map(|s| s.to_string()).collect()),
    };

    vec![
        venue(
            "Grand Ballroom Palace",
            "Banquet Hall",
            "Downtown Mumbai",
            "Mumbai",
            "₹50,000 - ₹80,000",
            4.8,
            245,
            "https://images.unsplash.com/photo-1519167758481-83f550bb49b3?w=800",
            &["Weddings", "Corporate Events", "Anniversaries"],
            &["Premium", "AC", "Parking"],
        ),
        venue(
            "Sunset Garden Resort",
            "Garden Venue",
            "Bandra West",
            "Mumbai",
            "₹30,000 - ₹60,000",
            4.6,
            189,
            "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?w=800",
            &["Weddings", "Birthday Parties", "Festivals"],
            &["Garden", "Catering", "Decoration"],
        ),
        venue(
            "Royal Heritage Hotel",
            "Hotel",
            "Colaba",
            "Mumbai",
            "₹70,000 - ₹1,20,000",
            4.9,
            312,
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
            &["Weddings", "Corporate Events"],
            &["Luxury", "5-Star", "Valet"],
        ),
        venue(
            "Beachside Paradise",
            "Beach Resort",
            "Juhu Beach",
            "Mumbai",
            "₹40,000 - ₹75,000",
            4.7,
            156,
            "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800",
            &["Weddings", "Birthday Parties"],
            &["Beach View", "Outdoor", "Sunset"],
        ),
        venue(
            "Modern Conference Center",
            "Conference Hall",
            "BKC",
            "Mumbai",
            "₹25,000 - ₹45,000",
            4.4,
            98,
            "https://images.unsplash.com/photo-1511578314322-379afb476865?w=800",
            &["Corporate Events", "Conferences"],
            &["Modern", "Tech-Ready", "AC"],
        ),
        venue(
            "Elegant Banquet Hall",
            "Banquet Hall",
            "Andheri East",
            "Mumbai",
            "₹35,000 - ₹55,000",
            4.5,
            203,
            "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800",
            &["Weddings", "Anniversaries", "Birthday Parties"],
            &["Elegant", "Catering", "Parking"],
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new()?;
    settings.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&settings.logging.level))
        .init();

    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let pool = connection::create_pool(&db_config).await?;
    connection::run_migrations(&pool).await?;

    let db = DatabaseService::new(pool);

    info!("Populating locations table...");
    db.locations.delete_all().await?;

    let mut total_added = 0;
    for (state, cities) in LOCATIONS_DATA {
        for city in *cities {
            db.locations
                .create(CreateLocationRequest {
                    state: state.to_string(),
                    city: city.to_string(),
                })
                .await?;
            total_added += 1;
        }
    }
    info!(total = total_added, states = LOCATIONS_DATA.len(), "Locations populated");

    info!("Populating sample venues...");
    db.venues.delete_all().await?;

    let venues = sample_venues();
    let venue_count = venues.len();
    for request in venues {
        let created = db.venues.create(request).await?;
        info!(venue = %created.name, "Created venue");
    }
    info!(total = venue_count, "Venues populated");

    Ok(())
}
