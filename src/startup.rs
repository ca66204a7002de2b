use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    routes::{
        default_route,
        docs_route::{self, ApiDoc},
        extract_route,
    },
    services::GoogleSearch,
};

pub fn run(listener: TcpListener, google_search: GoogleSearch) -> Result<Server, std::io::Error> {
    let google_search = web::Data::new(google_search);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health_check)
            .service(extract_route::extract_profile)
            .service(docs_route::openapi_json)
            .service(Redoc::with_url("/docs", ApiDoc::openapi()))
            .app_data(web::JsonConfig::default().error_handler(extract_route::json_error_handler))
            .app_data(google_search.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
