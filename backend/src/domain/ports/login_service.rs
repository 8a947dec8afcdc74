//! Driving port for administrator authentication.
//!
//! Handlers depend on this trait only, so tests can swap in
//! [`FixtureLoginService`] instead of configuring real credentials.

use async_trait::async_trait;

use crate::domain::{AdminIdentity, Error, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated administrator.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error>;
}

/// Accepts `admin` / `password`; test use only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            Ok(AdminIdentity::new("admin"))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "wrong", false)]
    #[case("other", "password", false)]
    #[tokio::test]
    async fn fixture_accepts_only_the_development_pair(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        match (should_succeed, FixtureLoginService.authenticate(&creds).await) {
            (true, Ok(identity)) => assert_eq!(identity.username(), "admin"),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (expected, other) => panic!("expected success={expected}, got {other:?}"),
        }
    }
}
