use jiff::civil::{Date, Time, date, time};
use mimalloc::MiMalloc;
use sojourn_planner::itinerary::day_plan::Itinerary;
use sojourn_planner::itinerary::location::Location;
use sojourn_planner::itinerary::pace::Pace;
use sojourn_planner::itinerary::place::{OpeningPeriod, PlaceCandidate, PlaceCandidateBuilder};
use sojourn_planner::planner::{DayPlanner, DayPlanRequest};
use sojourn_planner::quality::scorer::ItineraryScorer;
use sojourn_planner::utils::time::format_hhmm;
use sojourn_routing_providers::route_client::RouteClient;
use sojourn_routing_providers::route_provider::RouteProvider;
use sojourn_routing_providers::travel_mode::TravelMode;
use tracing::{Level, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

struct DemoDay {
    theme: &'static str,
    date: Date,
    places: Vec<PlaceCandidate>,
}

fn place(id: &str, name: &str, types: &[&str], lat: f64, lng: f64) -> PlaceCandidate {
    let mut builder = PlaceCandidateBuilder::default();
    builder
        .set_place_id(id.to_string())
        .set_name(name.to_string())
        .set_location(Location::new(lat, lng))
        .set_types(types.iter().map(|t| t.to_string()).collect());
    builder.build()
}

fn place_with_hours(
    id: &str,
    name: &str,
    types: &[&str],
    lat: f64,
    lng: f64,
    open: Time,
    close: Time,
) -> PlaceCandidate {
    let mut builder = PlaceCandidateBuilder::default();
    builder
        .set_place_id(id.to_string())
        .set_name(name.to_string())
        .set_location(Location::new(lat, lng))
        .set_types(types.iter().map(|t| t.to_string()).collect())
        .set_opening_hours((0..7).map(|day| OpeningPeriod { day, open, close }).collect());
    builder.build()
}

/// A two-day Hyderabad trip: the Old City on foot, then the forts and
/// the lake.
fn demo_days() -> Vec<DemoDay> {
    let mut charminar = place_with_hours(
        "charminar",
        "Charminar",
        &["tourist_attraction", "historical_landmark"],
        17.3616,
        78.4747,
        time(9, 30, 0, 0),
        time(17, 30, 0, 0),
    );
    charminar.set_suggested_duration_minutes(45);

    let mut chowmahalla = place_with_hours(
        "chowmahalla",
        "Chowmahalla Palace",
        &["palace", "museum"],
        17.3578,
        78.4717,
        time(10, 0, 0, 0),
        time(17, 0, 0, 0),
    );
    chowmahalla.set_suggested_duration_minutes(90);

    let mut salar_jung = place_with_hours(
        "salar-jung",
        "Salar Jung Museum",
        &["museum"],
        17.3713,
        78.4804,
        time(10, 0, 0, 0),
        time(19, 0, 0, 0),
    );
    salar_jung.set_suggested_duration_minutes(150);

    let mut golconda = place_with_hours(
        "golconda",
        "Golconda Fort",
        &["fort", "tourist_attraction"],
        17.3833,
        78.4011,
        time(9, 0, 0, 0),
        time(17, 30, 0, 0),
    );
    golconda.set_suggested_duration_minutes(150);

    let mut tombs = place(
        "qutb-shahi-tombs",
        "Qutb Shahi Tombs",
        &["tourist_attraction"],
        17.3949,
        78.3949,
    );
    tombs.set_suggested_duration_minutes(90);

    vec![
        DemoDay {
            theme: "Old City Heritage Walk",
            date: date(2025, 11, 15),
            places: vec![
                charminar,
                place(
                    "mecca-masjid",
                    "Mecca Masjid",
                    &["mosque"],
                    17.3604,
                    78.4736,
                ),
                place("laad-bazaar", "Laad Bazaar", &["market"], 17.3598, 78.4767),
                place("shadab", "Shadab", &["restaurant"], 17.3652, 78.4724),
                chowmahalla,
                salar_jung,
                place(
                    "nayaab",
                    "Nayaab Hotel",
                    &["restaurant"],
                    17.3635,
                    78.4775,
                ),
            ],
        },
        DemoDay {
            theme: "Forts, Tombs & the Lake",
            date: date(2025, 11, 16),
            places: vec![
                golconda,
                tombs,
                place(
                    "niloufer",
                    "Cafe Niloufer",
                    &["cafe"],
                    17.4062,
                    78.4691,
                ),
                place(
                    "hussain-sagar",
                    "Hussain Sagar",
                    &["tourist_attraction"],
                    17.4239,
                    78.4738,
                ),
                place_with_hours(
                    "lumbini",
                    "Lumbini Park",
                    &["park"],
                    17.4091,
                    78.4695,
                    time(9, 0, 0, 0),
                    time(21, 0, 0, 0),
                ),
                place("bawarchi", "Bawarchi", &["restaurant"], 17.4063, 78.4989),
            ],
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let client = RouteClient::from_env();
    let provider = if std::env::var("GOOGLE_ROUTES_API_KEY").is_ok() {
        RouteProvider::GoogleRoutesApi {
            travel_mode: TravelMode::Drive,
        }
    } else {
        info!("GOOGLE_ROUTES_API_KEY is not set, using straight-line estimates");
        RouteProvider::AsTheCrowFlies { speed_kmh: 25.0 }
    };

    let planner = DayPlanner::new(client, provider);

    let mut days = Vec::new();
    for (i, demo) in demo_days().into_iter().enumerate() {
        let day = planner
            .plan_day(DayPlanRequest {
                places: demo.places,
                date: demo.date,
                day_number: i as u32 + 1,
                theme: demo.theme.to_string(),
                pace: Pace::Moderate,
                preserve_order: false,
            })
            .await?;

        info!("Day {} - {} ({})", day.day_number, day.theme, day.date);
        for activity in &day.activities {
            info!(
                "  {} - {}  {} ({} min)",
                format_hhmm(activity.time_start),
                format_hhmm(activity.time_end),
                activity.place.name,
                activity.duration_minutes
            );
        }

        days.push(day);
    }

    let itinerary = Itinerary {
        destination: "Hyderabad".to_string(),
        days,
    };

    let report = ItineraryScorer::new().evaluate(&itinerary);
    println!("{}", report.summary());
    println!("{}", serde_json::to_string_pretty(&itinerary)?);

    Ok(())
}
