use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};

use crate::api::configs::Config;
use crate::api::errors::Error;

/// Admits the interaction relay holding the configured API key.
///
/// The key is read from the `Authorization` header, with or without a
/// `Bearer ` prefix. Without a configured key every request is admitted.
pub struct Auth;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = Error;

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(config) = request.rocket().state::<Config>() else {
            return Outcome::Error((
                Status::InternalServerError,
                Error::InternalServer("Missing Config".to_string()),
            ));
        };
        let Some(key) = config.api_key.as_deref() else {
            return Outcome::Success(Auth);
        };

        match request.headers().get_one("Authorization") {
            None => Outcome::Error((
                Status::Unauthorized,
                Error::MissingAPIKey("Missing API Key".to_string()),
            )),
            Some(token) if token.strip_prefix("Bearer ").unwrap_or(token) == key => {
                Outcome::Success(Auth)
            }
            Some(_) => {
                tracing::warn!(ip = ?request.client_ip(), "rejected invalid API key");
                Outcome::Error((
                    Status::Forbidden,
                    Error::InvalidAPIKey("Invalid API Key".to_string()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::utils::rand::rand_str;

    use super::*;

    use rocket::fairing::AdHoc;
    use rocket::http::Header;
    use rocket::local::blocking;

    #[post("/")]
    fn relay(_required: Auth) -> &'static str {
        "accepted"
    }

    #[test]
    fn test_without_config() {
        let app = rocket::build().mount("/", routes![relay]);
        let client = blocking::Client::tracked(app).expect("valid rocket instance");
        let response = client.post(uri!(relay)).dispatch();
        assert_eq!(response.status(), Status::InternalServerError);
    }

    fn test_client(config: Config) -> blocking::Client {
        use rocket::figment::{providers::Serialized, Figment};
        let figment = Figment::from(rocket::Config::default()).merge(Serialized::defaults(config));
        let app = rocket::custom(figment)
            .mount("/", routes![relay])
            .attach(AdHoc::config::<Config>());
        blocking::Client::tracked(app).expect("valid rocket instance")
    }

    #[test]
    fn test_open_relay() {
        let client = test_client(Config::default());
        let response = client.post(uri!(relay)).dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client
            .post(uri!(relay))
            .header(Header::new("Authorization", rand_str(32)))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn test_keyed_relay() {
        let key = rand_str(32);
        let client = test_client(Config {
            api_key: Some(key.clone()),
            ..Default::default()
        });

        let response = client.post(uri!(relay)).dispatch();
        assert_eq!(response.status(), Status::Unauthorized);

        for header in [key.clone(), format!("Bearer {}", key)] {
            let response = client
                .post(uri!(relay))
                .header(Header::new("Authorization", header))
                .dispatch();
            assert_eq!(response.status(), Status::Ok);
        }

        let response = client
            .post(uri!(relay))
            .header(Header::new("Authorization", rand_str(32)))
            .dispatch();
        assert_eq!(response.status(), Status::Forbidden);
    }
}
