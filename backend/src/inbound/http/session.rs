//! Admin session wrapper over the Actix cookie session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AdminIdentity, Error};

pub(crate) const ADMIN_KEY: &str = "admin";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated administrator, rotating the session id.
    pub fn persist_admin(&self, admin: &AdminIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_KEY, admin.username())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The administrator stored in the session, if any.
    pub fn admin(&self) -> Result<Option<AdminIdentity>, Error> {
        let stored = self
            .0
            .get::<String>(ADMIN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(match stored {
            Some(name) if !name.trim().is_empty() => Some(AdminIdentity::new(name)),
            Some(_) => {
                warn!("blank administrator in session cookie");
                None
            }
            None => None,
        })
    }

    /// `401 Unauthorized` unless an administrator is logged in.
    pub fn require_admin(&self) -> Result<AdminIdentity, Error> {
        self.admin()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn set_admin(session: SessionContext) -> Result<HttpResponse, Error> {
        session.persist_admin(&AdminIdentity::new("ana"))?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let admin = session.require_admin()?;
        Ok(HttpResponse::Ok().body(admin.username().to_owned()))
    }

    async fn set_blank(session: Session) -> HttpResponse {
        match session.insert(ADMIN_KEY, "  ") {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn round_trips_the_administrator() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/set", web::get().to(set_admin))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set.status(), StatusCode::OK);
        let cookie = session_cookie(&set);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "ana");
    }

    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let request = test::TestRequest::get().uri("/whoami").to_request();
        let res = test::call_service(&app, request).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_administrator_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/set-blank", web::get().to(set_blank))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let request = test::TestRequest::get().uri("/set-blank").to_request();
        let set = test::call_service(&app, request).await;
        let cookie = session_cookie(&set);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
