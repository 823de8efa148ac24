use crate::dashboard::stock_figure;
use crate::yahoo::PriceSource;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use viz_common::Pages;

const PAGE: &str = "stocks.html";
const TEMPLATE: &str = include_str!("../templates/stocks.html");

/// What the text box holds before the first submit.
pub const DEFAULT_INPUT: &str = "Apple, Microsoft";

/// Shared, read-only state of the stock dashboard.
pub struct StocksApp<S> {
    pages: Pages,
    source: S,
}

impl<S: PriceSource> StocksApp<S> {
    pub fn new(source: S) -> Result<Self> {
        Ok(StocksApp {
            pages: Pages::new(&[(PAGE, TEMPLATE)])?,
            source,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct LookupForm {
    pub input: String,
}

/// Register the dashboard's routes; `StocksApp<S>` must be in the app data.
pub fn configure<S: PriceSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index::<S>))
            .route(web::post().to(lookup::<S>)),
    );
}

// GET /
async fn index<S: PriceSource + 'static>(state: web::Data<StocksApp<S>>) -> HttpResponse {
    let mut context = Pages::context();
    context.insert("input", DEFAULT_INPUT);
    context.insert("message", &None::<String>);
    state.pages.respond(PAGE, &context)
}

// POST /
async fn lookup<S: PriceSource + 'static>(
    state: web::Data<StocksApp<S>>,
    form: web::Form<LookupForm>,
) -> HttpResponse {
    let mut context = Pages::context();
    context.insert("input", &form.input);

    let chart = match stock_figure(&state.source, &form.input, Utc::now()).await {
        Ok(figure) => figure
            .fragment("stock-chart")
            .map_err(|e| format!("Error retrieving stock data: {e}")),
        Err(e) => Err(e.to_string()),
    };

    match chart {
        Ok(fragment) => {
            context.insert("charts", &vec![fragment]);
            context.insert("message", &None::<String>);
        }
        Err(message) => {
            warn!("stock lookup for {:?} failed: {message}", form.input);
            context.insert("message", &Some(message));
        }
    }

    state.pages.respond(PAGE, &context)
}

/// Run the stock dashboard until the server is stopped.
pub async fn serve<S>(host: &str, port: u16, source: S) -> Result<()>
where
    S: PriceSource + Send + Sync + 'static,
{
    let state = web::Data::new(StocksApp::new(source)?);
    info!("Stock dashboard listening on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure::<S>)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
