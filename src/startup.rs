use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use crate::store::ProductStore;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpResponse, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn ProductStore>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let authorization = middleware::authorization::try_new(&settings.auth).await?;

    let settings = web::Data::new(settings);
    let store = web::Data::new(store);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match &err {
            error::JsonPayloadError::Deserialize(err) => format!("Invalid request body: {}", err),
            err => format!("Invalid request body: {}", err),
        };
        tracing::debug!("Rejected JSON payload: {}", msg);
        let response = HttpResponse::BadRequest().json(JsonResponse::<()>::error(&msg));
        error::InternalError::from_response(err, response).into()
    });

    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let msg = format!("Invalid query string: {}", err);
        tracing::debug!("Rejected query string: {}", msg);
        let response = HttpResponse::BadRequest().json(JsonResponse::<()>::error(&msg));
        error::InternalError::from_response(err, response).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(authorization.clone())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(settings.clone())
            .app_data(store.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(routes::product::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
