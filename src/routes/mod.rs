// Route exports
pub mod explore;

use actix_web::web;

use crate::services::CandidateStore;

pub fn configure_routes<S: CandidateStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(explore::configure::<S>),
    );
}
