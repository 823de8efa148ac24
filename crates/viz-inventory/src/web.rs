use crate::charts::{self, summary_table};
use crate::query::{by_product, FilterForm, Summary};
use crate::table::{FormOptions, InventoryTable};
use actix_web::{get, middleware::Logger, post, web, App, HttpServer, Responder};
use anyhow::Result;
use log::{debug, error, info, warn};
use viz_common::{Context, Pages};

const PAGE: &str = "inventory.html";
const TEMPLATE: &str = include_str!("../templates/inventory.html");

/// Shared, read-only state of the inventory dashboard.
pub struct InventoryApp {
    pages: Pages,
    table: InventoryTable,
    options: FormOptions,
}

impl InventoryApp {
    pub fn new(table: InventoryTable) -> Result<Self> {
        let options = table.options();
        Ok(InventoryApp {
            pages: Pages::new(&[(PAGE, TEMPLATE)])?,
            table,
            options,
        })
    }

    /// The empty form: dropdowns filled, nothing selected, nothing drawn.
    fn context(&self) -> Context {
        let mut context = Pages::context();
        context.insert("options", &self.options);
        context.insert("selected_company", "");
        context.insert("selected_month", &0);
        context.insert("selected_year", &0);
        context.insert("message", &None::<String>);
        context.insert("table", &None::<Vec<charts::TableRow>>);
        context.insert("heading", "");
        context.insert("rows", &0);
        context
    }
}

/// Register the dashboard's routes; `InventoryApp` must be in the app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(apply_filter);
}

#[get("/")]
async fn index(state: web::Data<InventoryApp>) -> impl Responder {
    state.pages.respond(PAGE, &state.context())
}

#[post("/")]
async fn apply_filter(
    state: web::Data<InventoryApp>,
    form: web::Form<FilterForm>,
) -> impl Responder {
    let mut context = state.context();
    context.insert("selected_company", &form.company_name);

    let filter = match form.parse() {
        Ok(filter) => filter,
        Err(e) => {
            warn!("inventory filter rejected: {e}");
            context.insert("message", &Some(e.to_string()));
            return state.pages.respond(PAGE, &context);
        }
    };
    context.insert("selected_month", &filter.month);
    context.insert("selected_year", &filter.year);

    let records = state.table.select(&filter);
    debug!("{} inventory rows for {}", records.len(), filter.describe());
    if records.is_empty() {
        let notice = format!("No inventory records for {}", filter.describe());
        context.insert("message", &Some(notice));
        return state.pages.respond(PAGE, &context);
    }

    let products = by_product(&records);
    let summary = Summary::of(&records);
    match charts::fragments(&products) {
        Ok(fragments) => context.insert("charts", &fragments),
        Err(e) => {
            error!("failed to build inventory charts for {}: {e:?}", filter.describe());
            context.insert("message", &Some("Failed to draw the charts".to_string()));
        }
    }
    context.insert("table", &Some(summary_table(&products, &summary)));
    context.insert("heading", &filter.describe());
    context.insert("rows", &summary.rows);

    state.pages.respond(PAGE, &context)
}

/// Run the inventory dashboard until the server is stopped.
pub async fn serve(host: &str, port: u16, table: InventoryTable) -> Result<()> {
    let state = web::Data::new(InventoryApp::new(table)?);
    info!("Inventory dashboard listening on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
