use crate::configuration::{RecordStoreSettings, Settings};
use crate::record_store_client::RecordStoreClient;
use actix_web::http::{Method, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, dev::Server, web};
use anyhow::Context;
use std::io::Error;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let record_store_client = get_record_store_client(&configuration.record_store)?;
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            record_store_client,
            configuration.application.expose_error_details,
            configuration.application.max_body_bytes,
            &configuration.application.cors_allowed_origin,
        )?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), Error> {
        self.server.await
    }
}

pub fn get_record_store_client(
    configuration: &RecordStoreSettings,
) -> Result<RecordStoreClient, anyhow::Error> {
    RecordStoreClient::new(
        &configuration.base_url,
        &configuration.base_id,
        &configuration.table_name,
        configuration.access_token.clone(),
        configuration.timeout(),
    )
}

// Retrieval from the context, in actix-web, is type-based: using
// a raw `bool` would expose us to conflicts.
pub struct ExposeErrorDetails(pub bool);

pub struct MaxBodyBytes(pub usize);

fn run(
    listener: TcpListener,
    record_store_client: RecordStoreClient,
    expose_error_details: bool,
    max_body_bytes: usize,
    cors_allowed_origin: &str,
) -> Result<Server, anyhow::Error> {
    let record_store_client = web::Data::new(record_store_client);
    let expose_error_details = web::Data::new(ExposeErrorDetails(expose_error_details));
    let max_body_bytes = web::Data::new(MaxBodyBytes(max_body_bytes));
    let allowed_origin = header::HeaderValue::from_str(cors_allowed_origin)
        .with_context(|| format!("{} is not a valid allowed origin", cors_allowed_origin))?;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(DefaultHeaders::new().add((
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                allowed_origin.clone(),
            )))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(crate::routes::health_check))
            .service(
                web::resource("/submit-waitlist")
                    .route(web::method(Method::OPTIONS).to(crate::routes::waitlist_preflight))
                    .route(web::post().to(crate::routes::submit_waitlist))
                    .default_service(web::to(crate::routes::waitlist_method_not_allowed)),
            )
            .app_data(web::Data::clone(&record_store_client))
            .app_data(web::Data::clone(&expose_error_details))
            .app_data(web::Data::clone(&max_body_bytes))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
