use std::process::ExitCode;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use log::info;

use bcra_dolar::{
    Bucket, Settings,
    fetch::build_client,
    handle,
    server::{AppState, configure},
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let client = build_client()?;
    let bucket = match &settings.local_dir {
        Some(dir) => Bucket::local(dir)
            .with_context(|| format!("Can't open local directory {}", dir.display()))?,
        None => Bucket::gcs(&settings.bucket)
            .with_context(|| format!("Can't open bucket {}", settings.bucket))?,
    };

    if let Some(port) = settings.port {
        serve(port, settings, client, bucket).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = handle(&settings, &client, &bucket).await;
    if outcome.is_success() {
        println!("{}", outcome.message);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", outcome.message);
        Ok(ExitCode::FAILURE)
    }
}

async fn serve(port: u16, settings: Settings, client: reqwest::Client, bucket: Bucket) -> Result<()> {
    let state = web::Data::new(AppState {
        settings,
        client,
        bucket,
    });

    info!("Listening on 0.0.0.0:{}", port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(("0.0.0.0", port))
        .with_context(|| format!("Can't bind port {}", port))?
        .run()
        .await?;

    Ok(())
}
