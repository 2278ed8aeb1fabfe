//! OpenWeatherMap client against a mock HTTP server.

use weather_core::{
    Condition, Coordinates, Query, WeatherError, WeatherProvider,
    provider::openweather::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn paris_current() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "base": "stations",
        "main": { "temp": 18.4, "feels_like": 17.9, "temp_min": 17.0, "temp_max": 19.6, "pressure": 1016, "humidity": 60 },
        "visibility": 10000,
        "wind": { "speed": 3.6, "deg": 240 },
        "clouds": { "all": 0 },
        "dt": 1714564800,
        "sys": { "type": 2, "id": 2041230, "country": "FR", "sunrise": 1714537000, "sunset": 1714589000 },
        "timezone": 7200,
        "id": 2988507,
        "name": "Paris",
        "cod": 200
    })
}

fn entry(dt: i64, label: &str, main: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": { "temp": 15.0, "temp_min": 11.2, "temp_max": 19.7, "humidity": 55 },
        "weather": [{ "id": 800, "main": main, "description": "whatever", "icon": icon }],
        "wind": { "speed": 2.0 },
        "dt_txt": label
    })
}

fn paris_forecast() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "cnt": 6,
        "list": [
            entry(1714554000, "2024-05-01 09:00:00", "Rain", "10d"),
            entry(1714564800, "2024-05-01 12:00:00", "Clear", "01d"),
            entry(1714575600, "2024-05-01 15:00:00", "Clouds", "03d"),
            entry(1714651200, "2024-05-02 12:00:00", "Snow", "13d"),
            entry(1714737600, "2024-05-03 12:00:00", "Mist", "50d"),
            entry(1714748400, "2024-05-03 15:00:00", "Clear", "01d")
        ],
        "city": { "id": 2988507, "name": "Paris", "country": "FR" }
    })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new("TEST_KEY".into()).with_base_url(&server.uri())
}

#[tokio::test]
async fn current_by_city_sends_metric_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server)
        .current(&Query::City("Paris".into()))
        .await
        .expect("current conditions");

    assert_eq!(current.display_temperature(), 18);
    assert_eq!(current.humidity_pct, 60);
    assert_eq!(current.condition, Condition::Clear);
    assert_eq!(current.description, "clear sky");
    assert_eq!(current.place, "Paris");
    assert_eq!(current.country, "FR");
}

#[tokio::test]
async fn current_by_coordinates_sends_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server)
        .current(&Query::Coordinates(Coordinates::new(48.85, 2.35)))
        .await
        .expect("current conditions");

    assert_eq!(current.place, "Paris");
}

#[tokio::test]
async fn unknown_city_is_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = provider(&server)
        .current(&Query::City("Atlantis".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound));
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn coordinate_failure_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server)
        .current(&Query::Coordinates(Coordinates::new(0.0, 0.0)))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Unable to fetch weather");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .current(&Query::City("Paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Decode(_)));
}

#[tokio::test]
async fn forecast_is_sampled_at_noon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "48.8534"))
        .and(query_param("lon", "2.3488"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    let days = provider(&server)
        .forecast(Coordinates::new(48.8534, 2.3488))
        .await
        .expect("forecast");

    let keywords: Vec<_> = days.iter().map(|d| d.condition.as_str().to_string()).collect();
    assert_eq!(keywords, ["Clear", "Snow", "Mist"]);
    assert!(days.iter().all(|d| d.timestamp.format("%H:%M:%S").to_string() == "12:00:00"));
    assert_eq!(days[0].icon, "01d");
}

#[tokio::test]
async fn forecast_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .forecast(Coordinates::new(1.0, 2.0))
        .await
        .unwrap_err();

    match err {
        WeatherError::ForecastStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
