//! Run the family search and date filters from the command line.
//!
//! Defaults to the demo fixture data; pass --remote to query the backend.

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use har_ghar_munga::api::{FamilyRepository, FixtureRepository, HgmApiClient};
use har_ghar_munga::models::Config;
use har_ghar_munga::search::{bucket_count, filter_families, DateBucket};

#[derive(Parser, Debug)]
#[command(name = "search_families", about = "Search registered families")]
struct Args {
    /// Search text (child name, parent name, mobile or village)
    #[arg(default_value = "")]
    query: String,

    /// Date filter: all, today, yesterday, this-month, last-month
    #[arg(long, default_value = "all")]
    filter: String,

    /// Query the configured backend instead of demo data
    #[arg(long)]
    remote: bool,
}

fn parse_bucket(raw: &str) -> Result<DateBucket> {
    match raw {
        "all" => Ok(DateBucket::All),
        "today" => Ok(DateBucket::Today),
        "yesterday" => Ok(DateBucket::Yesterday),
        "this-month" => Ok(DateBucket::ThisMonth),
        "last-month" => Ok(DateBucket::LastMonth),
        other => anyhow::bail!("unknown filter: {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let bucket = parse_bucket(&args.filter)?;
    let today = Local::now().date_naive();

    let families = if args.remote {
        let config = Config::from_env()?;
        let client = HgmApiClient::new(&config)?;
        client.families(None).await?
    } else {
        FixtureRepository::new().families(None).await?
    };

    for chip in DateBucket::CHIPS {
        print!("{} ({})  ", chip.label(), bucket_count(&families, chip, today));
    }
    println!();

    let hits = filter_families(&families, &args.query, bucket, today);
    if hits.is_empty() {
        println!("कोई परिवार नहीं मिला");
        return Ok(());
    }

    println!("{} परिवार मिले:", hits.len());
    for family in &hits {
        println!(
            "  {} | {} | माता/पिता: {} | गाँव: {} | {} | {}",
            family.id,
            family.child_name,
            family.parent_name,
            family.village,
            family.registration_date,
            family.mobile_number
        );
    }

    Ok(())
}
