use trips_graphql::{Config, TripsScreen, Update};

fn render(update: Update) {
    if let Some(notice) = &update.notice {
        eprintln!("{notice}");
    }
    for row in &update.rows {
        println!("{row}");
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };
    log::debug!("config={:#?}", config);

    let mut screen = match TripsScreen::from_config(&config) {
        Ok(screen) => screen,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };

    let update = screen.subscribe();
    tokio::select! {
        update = update => match update {
            Ok(update) => render(update),
            Err(..) => log::warn!("No update was delivered"),
        },
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted before the trips arrived");
        }
    }
    screen.teardown();
}
