#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod dashboard;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use std::sync::Arc;

use clap::{Parser, crate_version};

use crate::{
    api::Backend,
    cli::{Args, Command, billing, series, tariff, watch},
    prelude::*,
    tables::{build_meters_table, build_sites_table},
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let api = args.api.new_client()?;

    match args.command {
        Command::Sites => {
            let sites = api.get_sites().await;
            if sites.is_empty() {
                println!("No sites found.");
            } else {
                println!("{}", build_sites_table(&sites));
            }
        }
        Command::Meters(args) => {
            let meters = api.get_meters(&args.site_code).await;
            if meters.is_empty() {
                println!("No meters found.");
            } else {
                println!("{}", build_meters_table(&meters));
            }
        }
        Command::Series(args) => series(&api, &args).await?,
        Command::Tariff(args) => tariff(&api, &args).await?,
        Command::Billing(args) => billing(&api, &args).await?,
        Command::Watch(args) => watch(Arc::new(api), &args).await?,
    }

    info!("done!");
    Ok(())
}
