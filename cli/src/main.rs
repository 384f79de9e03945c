//! Extreme Park booking operator client
//!
//! ```sh
//! park-cli book --name "A B" --phone 1234567890 --age 20 \
//!     --date 2024-06-01 --attraction Zipline
//! park-cli list
//! park-cli watch --interval 5
//! park-cli update 1 --age 21 --attraction "Rope Park" --attraction Zipline
//! park-cli delete 1
//! park-cli clear --yes
//! PARK_ADMIN_PASSWORD=... park-cli login
//! park-cli hash-password 'new secret'
//! ```

mod client;
mod render;

use std::process::ExitCode;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use park_booking::domain::{Attraction, BookingDetails};
use park_booking::infrastructure::crypto::password::hash_password;

use client::{ApiClient, ClientError, ClientResult};

/// Operator client for the park booking service.
#[derive(Parser, Debug)]
#[command(name = "park-cli", version, about = "Manage park bookings from the terminal")]
struct Cli {
    /// Base URL of the booking service.
    #[arg(long, env = "PARK_SERVER_URL", default_value = "http://127.0.0.1:8001")]
    server: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new booking.
    Book(BookArgs),
    /// Print every booking.
    List,
    /// Re-print the booking list periodically until Ctrl+C.
    Watch {
        /// Seconds between refreshes.
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },
    /// Change fields of an existing booking; the rest are kept.
    Update {
        id: i32,
        #[command(flatten)]
        changes: BookingChanges,
    },
    /// Delete one booking.
    Delete { id: i32 },
    /// Delete every booking.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Check the admin password against the server.
    Login {
        #[arg(long, default_value = "admin")]
        username: String,
        #[arg(long, env = "PARK_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print a bcrypt hash to use as the server's `admin.password_hash`.
    HashPassword { password: String },
}

#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    age: i32,
    /// Visit date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,
    /// Attraction to book; repeat for several.
    #[arg(long = "attraction", required = true)]
    attractions: Vec<Attraction>,
}

impl From<BookArgs> for BookingDetails {
    fn from(a: BookArgs) -> Self {
        Self {
            name: a.name,
            phone: a.phone,
            age: a.age,
            date: a.date,
            attractions: a.attractions,
        }
    }
}

#[derive(Args, Debug, Default)]
struct BookingChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    age: Option<i32>,
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Replaces the whole attraction list when given.
    #[arg(long = "attraction")]
    attractions: Vec<Attraction>,
}

impl BookingChanges {
    /// Overlay the given fields on `current`, producing the full record the
    /// server expects for a replacement.
    fn apply(self, mut current: BookingDetails) -> BookingDetails {
        if let Some(name) = self.name {
            current.name = name;
        }
        if let Some(phone) = self.phone {
            current.phone = phone;
        }
        if let Some(age) = self.age {
            current.age = age;
        }
        if let Some(date) = self.date {
            current.date = date;
        }
        if !self.attractions.is_empty() {
            current.attractions = self.attractions;
        }
        current
    }
}

/// Refresh loop for `watch`. A failed poll is reported and retried on the
/// next tick; only Ctrl+C ends it.
async fn watch(client: &ApiClient, interval: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => match client.list().await {
                Ok(bookings) => {
                    // clear screen, cursor home
                    print!("\x1b[2J\x1b[H");
                    println!("{}", render::bookings_table(&bookings));
                    println!("\nRefreshing every {}s, Ctrl+C to stop.", interval.max(1));
                }
                Err(e) => {
                    warn!("Refresh failed: {}", e);
                    eprintln!("refresh failed: {} (retrying in {}s)", e, interval.max(1));
                }
            },
            _ = tokio::signal::ctrl_c() => return,
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    if let Command::HashPassword { password } = &cli.command {
        let hash = hash_password(password).map_err(|e| ClientError::Hash(e.to_string()))?;
        println!("{}", hash);
        return Ok(());
    }

    let client = ApiClient::new(&cli.server, Duration::from_secs(cli.timeout))?;
    debug!("Using server {}", cli.server);

    match cli.command {
        Command::Book(args) => {
            let id = client.create(args.into()).await?;
            println!("Booking {} created", id);
        }
        Command::List => {
            let bookings = client.list().await?;
            println!("{}", render::bookings_table(&bookings));
        }
        Command::Watch { interval } => watch(&client, interval).await,
        Command::Update { id, changes } => {
            let current = client.get(id).await?;
            client.replace(id, changes.apply(current.details())).await?;
            println!("Booking {} updated", id);
        }
        Command::Delete { id } => {
            println!("{}", client.delete(id).await?);
        }
        Command::Clear { yes } => {
            if !yes {
                eprintln!("Refusing to delete every booking without --yes");
                return Ok(());
            }
            let removed = client.delete_all().await?;
            println!("Deleted {} bookings", removed);
        }
        Command::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("Credentials accepted");
        }
        Command::HashPassword { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use park_booking::domain::Booking;

    fn current() -> BookingDetails {
        BookingDetails {
            name: "A B".into(),
            phone: "1234567890".into(),
            age: 20,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            attractions: vec![Attraction::Zipline],
        }
    }

    #[test]
    fn book_arguments_parse_into_details() {
        let cli = Cli::try_parse_from([
            "park-cli",
            "book",
            "--name",
            "A B",
            "--phone",
            "1234567890",
            "--age",
            "20",
            "--date",
            "2024-06-01",
            "--attraction",
            "zipline",
            "--attraction",
            "Rope Park",
        ])
        .unwrap();
        let Command::Book(args) = cli.command else {
            panic!("expected book");
        };
        let details = BookingDetails::from(args);
        assert_eq!(details.attractions, vec![Attraction::Zipline, Attraction::RopePark]);
        assert!(details.validate().is_ok());
    }

    #[test]
    fn unknown_attraction_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from([
            "park-cli",
            "book",
            "--name",
            "A",
            "--phone",
            "1234567890",
            "--age",
            "20",
            "--date",
            "2024-06-01",
            "--attraction",
            "Ferris Wheel",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn update_keeps_fields_that_were_not_given() {
        let changes = BookingChanges {
            age: Some(30),
            ..Default::default()
        };
        let merged = changes.apply(current());
        assert_eq!(merged.age, 30);
        assert_eq!(merged.name, "A B");
        assert_eq!(merged.attractions, vec![Attraction::Zipline]);
    }

    #[test]
    fn update_attractions_replace_the_list() {
        let changes = BookingChanges {
            attractions: vec![Attraction::ClimbingWall, Attraction::TrampolinePark],
            ..Default::default()
        };
        let merged = changes.apply(Booking::new(1, current()).details());
        assert_eq!(
            merged.attractions,
            vec![Attraction::ClimbingWall, Attraction::TrampolinePark]
        );
    }

    #[tokio::test]
    async fn watch_keeps_polling_when_server_is_unreachable() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let outcome = tokio::time::timeout(Duration::from_millis(2500), watch(&client, 1)).await;
        assert!(outcome.is_err(), "watch returned after a failed poll");
    }

    #[test]
    fn server_url_defaults_to_local_port() {
        let cli = Cli::try_parse_from(["park-cli", "list"]).unwrap();
        if std::env::var("PARK_SERVER_URL").is_err() {
            assert_eq!(cli.server, "http://127.0.0.1:8001");
        }
        assert_eq!(cli.timeout, 10);
    }
}
