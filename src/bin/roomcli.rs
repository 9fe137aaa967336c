use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rb_arn::{
    profile::BookingProfile, transcript::Exchange, Client, Credentials, SearchCall, SearchKind,
    StayRequest,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "Search, price and book hotel rooms")]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(
        short = 'e',
        long,
        env = "ARN_ENDPOINT",
        global = true,
        help = "Hotel service endpoint. Defaults to the production API."
    )]
    pub endpoint: Option<String>,

    #[arg(long, env = "ARN_SITE_ID", global = true, default_value = "")]
    pub site_id: String,

    #[arg(long, env = "ARN_USERNAME", global = true, default_value = "")]
    pub username: String,

    #[arg(
        long,
        env = "ARN_PASSWORD",
        global = true,
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(
        short = 't',
        long,
        global = true,
        help = "Directory to write request/response transcripts to, one folder per endpoint"
    )]
    pub transcript_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = "Test",
        help = "File name prefix for transcripts"
    )]
    pub transcript_name: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[clap(about = "Print the raw availability document for a stay")]
    Availability {
        #[command(flatten)]
        stay_opts: StayOpts,
    },

    #[clap(about = "Price the first available room for a stay")]
    Quote {
        #[command(flatten)]
        stay_opts: StayOpts,
    },

    #[clap(about = "Price and reserve the first available room for a stay")]
    Book {
        #[command(flatten)]
        stay_opts: StayOpts,

        #[arg(
            short = 'p',
            long = "profile",
            help = "JSON file with guest and payment details"
        )]
        profile_path: PathBuf,

        #[arg(long, help = "Record locator. A random one is used if not given.")]
        record_locator: Option<String>,
    },

    #[clap(about = "Look up cities by name, to find hotels to search")]
    Cities {
        #[command(flatten)]
        place_opts: PlaceOpts,
    },

    #[clap(about = "Look up airports by name or code")]
    Airports {
        #[command(flatten)]
        place_opts: PlaceOpts,
    },
}

#[derive(Args, Debug)]
struct PlaceOpts {
    #[arg(short = 'n', long, help = "Name, or start of a name, to look up")]
    pub name: String,

    #[arg(long, default_value_t = 10)]
    pub count: u32,
}

#[derive(Args, Debug)]
struct StayOpts {
    #[arg(short = 'H', long, help = "Hotel to search")]
    pub hotel_id: String,

    #[arg(long, help = "Check-in date (YYYY-MM-DD). Defaults to 30 days from today.")]
    pub check_in: Option<NaiveDate>,

    #[arg(long, help = "Check-out date (YYYY-MM-DD). Defaults to 35 days from today.")]
    pub check_out: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    pub rooms: u32,

    #[arg(long, default_value_t = 2)]
    pub adults: u32,

    #[arg(long, value_delimiter = ',', help = "Comma separated child ages")]
    pub child_ages: Vec<u32>,
}

impl StayOpts {
    fn to_stay(&self) -> Result<StayRequest> {
        let today = Local::now().date_naive();
        let days_out = |days| {
            today
                .checked_add_days(Days::new(days))
                .context("date out of range")
        };
        let check_in = match self.check_in {
            Some(date) => date,
            None => days_out(30)?,
        };
        let check_out = match self.check_out {
            Some(date) => date,
            None => days_out(35)?,
        };
        Ok(StayRequest::builder()
            .hotel_id(self.hotel_id.as_str())
            .check_in(check_in)
            .check_out(check_out)
            .rooms(self.rooms)
            .adults(self.adults)
            .child_ages(self.child_ages.clone())
            .build()?)
    }
}

impl GlobalOpts {
    async fn record(&self, exchanges: impl IntoIterator<Item = Exchange>) -> Result<()> {
        let Some(dir) = &self.transcript_dir else {
            return Ok(());
        };
        for exchange in exchanges {
            exchange.save(dir, &self.transcript_name).await?;
        }
        Ok(())
    }

    async fn record_searches(&self, client: &Client, calls: &[SearchCall]) -> Result<()> {
        self.record(
            calls
                .iter()
                .map(|call| Exchange::search(client.credentials(), call)),
        )
        .await
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let opts = &args.global_opts;
    if opts.site_id.is_empty() || opts.username.is_empty() {
        warn!("site id or username not set; the API will reject the request");
    }
    let http = rb_arn::default_http_client(opts.timeout.map(Duration::from_secs))?;
    let credentials = Credentials::new(&opts.site_id, &opts.username, &opts.password);
    let client = Client::new(http, opts.endpoint.as_deref(), credentials)?;

    match args.subcommand {
        Command::Availability { stay_opts } => {
            let stay = stay_opts.to_stay()?;
            let call = client.availability_call(&stay).await?;
            opts.record_searches(&client, std::slice::from_ref(&call))
                .await?;
            println!("{}", serde_json::to_string_pretty(&call.document()?)?);
        }
        Command::Quote { stay_opts } => {
            let stay = stay_opts.to_stay()?;
            let mut calls = Vec::new();
            let quote = client.quote_recorded(&stay, &mut calls).await;
            opts.record_searches(&client, &calls).await?;
            println!("{}", serde_json::to_string_pretty(&quote?)?);
        }
        Command::Book {
            stay_opts,
            profile_path,
            record_locator,
        } => {
            let stay = stay_opts.to_stay()?;
            let mut profile = BookingProfile::load(&profile_path).await?;
            if record_locator.is_some() {
                profile.extras.record_locator = record_locator;
            }
            let record_locator = profile
                .extras
                .record_locator
                .get_or_insert_with(|| Uuid::new_v4().to_string());
            info!(%record_locator, "booking");

            let mut calls = Vec::new();
            let quote = client.quote_recorded(&stay, &mut calls).await;
            opts.record_searches(&client, &calls).await?;
            let booking = client
                .reserve(&stay, quote?, &profile.guest, &profile.payment, &profile.extras)
                .await?;
            opts.record([Exchange::reservation(
                client.endpoint(),
                client.credentials(),
                &booking.request,
                &booking.response,
            )])
            .await?;
            println!("{}", serde_json::to_string_pretty(&booking.outcome)?);
            if !booking.outcome.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Cities { place_opts } => {
            search_places(opts, &client, SearchKind::Cities, &place_opts).await?;
        }
        Command::Airports { place_opts } => {
            search_places(opts, &client, SearchKind::Airports, &place_opts).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn search_places(
    opts: &GlobalOpts,
    client: &Client,
    kind: SearchKind,
    place_opts: &PlaceOpts,
) -> Result<()> {
    let call = client
        .places_call(kind, &place_opts.name, place_opts.count)
        .await?;
    opts.record_searches(client, std::slice::from_ref(&call))
        .await?;
    println!("{}", serde_json::to_string_pretty(&call.document()?)?);
    Ok(())
}
