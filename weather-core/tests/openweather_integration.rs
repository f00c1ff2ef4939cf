//! Integration tests for the OpenWeather client and the widget using wiremock.

use weather_core::{
    Background, Coordinates, IconAsset, IpGeolocator, LocationError, LookupError,
    OpenWeatherProvider, Query, WeatherProvider, WeatherWidget, lookup,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a current-weather body
fn current_body(name: &str, temp: f64, main: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 500, "main": main, "description": "light rain", "icon": icon }],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": temp - 2.3,
            "temp_min": temp - 1.0,
            "temp_max": temp + 1.0,
            "pressure": 1009,
            "humidity": 87
        },
        "visibility": 10000,
        "wind": { "speed": 5.14, "deg": 240 },
        "dt": 1_710_000_000,
        "sys": { "country": "GB", "sunrise": 1_709_966_000, "sunset": 1_710_007_000 },
        "timezone": 0,
        "id": 2643743,
        "name": name,
        "cod": 200
    })
}

/// Helper to create a 40-entry, 3-hourly forecast body starting 2024-03-10 00:00 UTC
fn forecast_body() -> serde_json::Value {
    let start: i64 = 1_710_028_800;
    let list: Vec<_> = (0..40)
        .map(|i: i64| {
            let dt = start + i * 10_800;
            let txt = chrono::DateTime::from_timestamp(dt, 0)
                .unwrap()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            serde_json::json!({
                "dt": dt,
                "main": { "temp": 5.5 },
                "weather": [{ "main": "Snow", "description": "light snow", "icon": "13d" }],
                "dt_txt": txt
            })
        })
        .collect();
    serde_json::json!({ "cod": "200", "cnt": 40, "list": list })
}

async fn mount_current_by_city(server: &MockServer, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", city))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .and(query_param("units", "metric"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn test_current_by_city_success() {
    let server = MockServer::start().await;
    mount_current_by_city(&server, "London", current_body("London", 8.9, "Rain", "10d")).await;

    let res = provider(&server).current(&Query::City("London".into())).await.unwrap();

    assert_eq!(res.name, "London");
    assert_eq!(res.coord, Coordinates { lat: 51.5085, lon: -0.1257 });
    assert_eq!(res.main.pressure, Some(1009));
}

#[tokio::test]
async fn test_current_by_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 12.0, "Clear", "01d")))
        .expect(1)
        .mount(&server)
        .await;

    let at = Coordinates { lat: 48.8566, lon: 2.3522 };
    let res = provider(&server).current(&Query::Coordinates(at)).await.unwrap();
    assert_eq!(res.name, "Paris");
}

#[tokio::test]
async fn test_lookup_combines_current_and_forecast() {
    let server = MockServer::start().await;
    mount_current_by_city(&server, "London", current_body("London", -0.4, "Rain", "10n")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let report = lookup(&provider(&server), &Query::City("London".into())).await.unwrap();

    assert_eq!(report.conditions.temperature, -1);
    assert_eq!(report.conditions.feels_like, Some(-3));
    assert_eq!(report.conditions.humidity, 87);
    assert_eq!(report.conditions.wind_speed, 5.14);
    assert_eq!(report.conditions.country, "GB");
    assert_eq!(report.conditions.icon, IconAsset::Rain);
    assert_eq!(report.background, Background::Rain);

    assert_eq!(report.forecast.len(), 5);
    for pair in report.forecast.windows(2) {
        assert!(pair[0].local_time < pair[1].local_time);
    }
    for day in &report.forecast {
        assert_eq!(day.local_time.format("%H:%M:%S").to_string(), "12:00:00");
        assert_eq!(day.temperature, 5);
        assert_eq!(day.icon, IconAsset::Snow);
    }
}

#[tokio::test]
async fn test_forecast_uses_echoed_coordinates() {
    let server = MockServer::start().await;
    // The city query is ambiguous; the forecast must follow the resolved coord.
    mount_current_by_city(&server, "Londres", current_body("London", 10.0, "Clouds", "03d")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let report = lookup(&provider(&server), &Query::City("Londres".into())).await.unwrap();
    assert_eq!(report.forecast.len(), 5);
    assert_eq!(report.background, Background::Clouds);
}

#[tokio::test]
async fn test_forecast_failure_keeps_current() {
    let server = MockServer::start().await;
    mount_current_by_city(&server, "London", current_body("London", 15.2, "Clear", "01d")).await;
    mount_forecast(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let report = lookup(&provider(&server), &Query::City("London".into())).await.unwrap();
    assert_eq!(report.conditions.temperature, 15);
    assert!(report.forecast.is_empty());
}

#[tokio::test]
async fn test_not_found_uses_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = lookup(&provider(&server), &Query::City("Atlantis".into())).await.unwrap_err();
    assert_eq!(err, LookupError::NotFound("city not found".into()));
}

#[tokio::test]
async fn test_error_without_message_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "cod": "404" })))
        .mount(&server)
        .await;

    let err = lookup(&provider(&server), &Query::City("Atlantis".into())).await.unwrap_err();
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn test_non_json_error_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = lookup(&provider(&server), &Query::City("London".into())).await.unwrap_err();
    assert_eq!(err, LookupError::Transport);
    assert_eq!(err.to_string(), "Failed to fetch weather data");
}

#[tokio::test]
async fn test_unauthorized_message_surfaces_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", ""))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url(String::new(), server.uri());
    let err = lookup(&provider, &Query::City("London".into())).await.unwrap_err();
    assert!(err.to_string().starts_with("Invalid API key"));
}

#[tokio::test]
async fn test_garbage_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = lookup(&provider(&server), &Query::City("London".into())).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch weather data");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let provider = OpenWeatherProvider::with_base_url("test-key".into(), uri);
    let err = lookup(&provider, &Query::City("London".into())).await.unwrap_err();
    assert_eq!(err, LookupError::Transport);
}

#[tokio::test]
async fn test_widget_mount_scenario() {
    let server = MockServer::start().await;
    mount_current_by_city(&server, "London", current_body("London", 11.99, "Drizzle", "09d")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let mut widget = WeatherWidget::new(provider(&server));
    assert!(!widget.state().loading);
    widget.mount().await;

    let state = widget.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    let conditions = state.conditions.as_ref().unwrap();
    assert_eq!(conditions.location, "London");
    assert_eq!(conditions.temperature, 11);
    assert_eq!(state.forecast.len(), 5);
    assert_eq!(state.background, Background::Rain);
}

#[tokio::test]
async fn test_widget_empty_query_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(provider(&server));
    widget.search("").await;

    assert_eq!(widget.state().error.as_ref().unwrap().to_string(), "Please enter a city name");
    assert!(widget.state().conditions.is_none());
}

#[tokio::test]
async fn test_widget_not_found_scenario() {
    let server = MockServer::start().await;
    mount_current_by_city(&server, "London", current_body("London", 9.0, "Clear", "01d")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Nowhereville"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(provider(&server));
    widget.mount().await;
    assert!(widget.state().conditions.is_some());

    widget.search("Nowhereville").await;
    let state = widget.state();
    assert_eq!(state.error.as_ref().unwrap().to_string(), "city not found");
    assert!(state.conditions.is_none());
    assert!(state.forecast.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_ip_geolocator_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "London",
            "latitude": 51.5085,
            "longitude": -0.1257
        })))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(format!("{}/json/", server.uri()));
    let at = weather_core::Geolocator::current_position(&geo).await.unwrap();
    assert_eq!(at, Coordinates { lat: 51.5085, lon: -0.1257 });
}

#[tokio::test]
async fn test_widget_location_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 51.5085,
            "longitude": -0.1257
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", 7.0, "Clear", "01n")))
        .mount(&server)
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let geo = IpGeolocator::new(format!("{}/json/", server.uri()));
    let mut widget = WeatherWidget::new(provider(&server));
    widget.search_by_location(&geo).await;

    let state = widget.state();
    assert!(!state.loading);
    assert_eq!(state.conditions.as_ref().unwrap().location, "London");
    assert_eq!(state.background, Background::Clear);
}

#[tokio::test]
async fn test_widget_location_denied_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(format!("{}/json/", server.uri()));
    let mut widget = WeatherWidget::new(provider(&server));
    widget.search_by_location(&geo).await;

    let state = widget.state();
    assert!(!state.loading);
    assert_eq!(
        state.error.as_ref().unwrap().to_string(),
        "Location access denied. Please search manually."
    );
}

#[tokio::test]
async fn test_ip_geolocator_rejected_status_is_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(format!("{}/json/", server.uri()));
    let err = weather_core::Geolocator::current_position(&geo).await.unwrap_err();
    assert!(matches!(err, LocationError::Denied));

    let mut widget = WeatherWidget::new(provider(&server));
    widget.search_by_location(&geo).await;
    assert!(!widget.state().loading);
    assert_eq!(widget.state().error, Some(LookupError::PermissionDenied));
}

#[tokio::test]
async fn test_ip_geolocator_unreachable_is_unavailable() {
    let server = MockServer::start().await;
    let url = format!("{}/json/", server.uri());
    drop(server);

    let geo = IpGeolocator::new(url);
    let err = weather_core::Geolocator::current_position(&geo).await.unwrap_err();
    assert!(matches!(err, LocationError::Unavailable(_)));

    let weather = MockServer::start().await;
    let mut widget = WeatherWidget::new(provider(&weather));
    widget.search_by_location(&geo).await;
    assert!(!widget.state().loading);
    assert_eq!(
        widget.state().error.as_ref().unwrap().to_string(),
        "Location access denied. Please search manually."
    );
}
