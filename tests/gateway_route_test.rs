#[cfg(test)]
mod gateway_route {

    use std::sync::Arc;
    use std::time::Duration;

    use axum::Router;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use url::Url;
    use weather_gateway::forward_service::reqwest_forward_service::ReqwestForwardService;
    use weather_gateway::location_log::location_log::LocationLog;
    use weather_gateway::prediction_service::gateway_prediction_service::GatewayPredictionService;
    use weather_gateway::proxy_service::proxy_config::{ProxyConfig, UrlOverridePolicy};
    use weather_gateway::proxy_service::simple_proxy_service::SimpleProxyService;
    use weather_gateway::weather_store::file_weather_store::FileWeatherStore;
    use weather_gateway::{ServerState, router};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Gateway {
        app: Router,
        _data_dir: TempDir,
    }

    fn gateway(config: ProxyConfig) -> Gateway {
        let data_dir = tempfile::tempdir().unwrap();

        let forward_service =
            Arc::new(ReqwestForwardService::with_timeout(Duration::from_secs(5)).unwrap());
        let proxy_service = Arc::new(SimpleProxyService::new(forward_service, config));
        let prediction_service = Arc::new(GatewayPredictionService::new(
            proxy_service.clone(),
            "/clima".to_string(),
        ));

        let app = router(ServerState {
            proxy_service,
            prediction_service,
            weather_store: Arc::new(FileWeatherStore::new(data_dir.path())),
            location_log: Arc::new(LocationLog::default()),
            max_body_bytes: 1024 * 1024,
        });

        Gateway {
            app,
            _data_dir: data_dir,
        }
    }

    fn config_for(mock_server: &MockServer) -> ProxyConfig {
        ProxyConfig {
            base_url: Some(Url::parse(&mock_server.uri()).unwrap()),
            ..ProxyConfig::default()
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    fn json_of(body: &Bytes) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn should_relay_the_default_path_with_injected_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clima"))
            .and(header("authorization", "Bearer hf_secret"))
            .and(header("accept", "application/json"))
            .and(header("x-trace", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "temp_max": 30.5 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(ProxyConfig {
            api_key: Some("hf_secret".to_string()),
            ..config_for(&mock_server)
        });

        let (status, body) = send(
            &gateway.app,
            Request::get("/api/hf")
                .header("host", "evil.example")
                .header("x-trace", "abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({ "temp_max": 30.5 }));

        let received = mock_server.received_requests().await.unwrap();
        let host = received[0].headers.get("host").unwrap().to_str().unwrap();
        assert_ne!(host, "evil.example");
    }

    #[tokio::test]
    async fn should_keep_every_value_of_repeated_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clima"))
            .respond_with(
                ResponseTemplate::new(200)
                    .append_header("set-cookie", "a=1")
                    .append_header("set-cookie", "b=2")
                    .set_body_string("ok"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let response = gateway
            .app
            .clone()
            .oneshot(
                Request::get("/api/hf")
                    .header("cookie", "x=1")
                    .header("cookie", "y=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let relayed: Vec<&str> = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(relayed, vec!["a=1", "b=2"]);

        let received = mock_server.received_requests().await.unwrap();
        let forwarded: Vec<&str> = received[0]
            .headers
            .get_all("cookie")
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(forwarded, vec!["x=1", "y=2"]);
    }

    #[tokio::test]
    async fn should_honour_a_path_carrying_its_own_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/other"))
            .and(query_param("x", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("other"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let (status, body) = send(
            &gateway.app,
            Request::get("/api/hf?path=%2Fother%3Fx%3D1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Bytes::from("other"));
    }

    #[tokio::test]
    async fn should_forward_a_json_body_with_the_same_structure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clima"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let (status, _) = send(
            &gateway.app,
            Request::post("/api/hf")
                .header("content-type", "application/json")
                .body(Body::from("{ \"a\" : [1, 2],\n \"b\": {\"c\": null} }"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let received = mock_server.received_requests().await.unwrap();
        let forwarded: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(forwarded, json!({ "a": [1, 2], "b": { "c": null } }));
    }

    #[tokio::test]
    async fn should_forward_form_fields_and_binary_bodies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));
        let binary = vec![0u8, 255, 1, 254, 128];

        let (status, _) = send(
            &gateway.app,
            Request::put("/api/hf?path=/form")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("city=Ciudad+de+M%C3%A9xico&zoom=4"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &gateway.app,
            Request::put("/api/hf?path=/blob")
                .header("content-type", "application/octet-stream")
                .body(Body::from(binary.clone()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let received = mock_server.received_requests().await.unwrap();

        let mut fields: Vec<(String, String)> =
            url::form_urlencoded::parse(&received[0].body)
                .into_owned()
                .collect();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("city".to_string(), "Ciudad de México".to_string()),
                ("zoom".to_string(), "4".to_string()),
            ]
        );

        assert_eq!(received[1].url.path(), "/blob");
        assert_eq!(received[1].body, binary);
    }

    #[tokio::test]
    async fn should_wrap_a_non_ok_upstream_answer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not Found" })))
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let (status, body) = send(
            &gateway.app,
            Request::get("/api/hf?path=/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let body = json_of(&body);
        assert_eq!(body["upstreamStatus"], json!(404));
        assert_eq!(body["method"], json!("GET"));
        assert_eq!(body["payload"], json!({ "error": "Not Found" }));
        assert!(
            body["upstreamUrl"]
                .as_str()
                .unwrap()
                .ends_with("/missing")
        );
    }

    #[tokio::test]
    async fn should_report_a_transport_failure() {
        let gateway = gateway(ProxyConfig {
            base_url: Some(Url::parse("http://127.0.0.1:1").unwrap()),
            ..ProxyConfig::default()
        });

        let (status, body) = send(
            &gateway.app,
            Request::delete("/api/hf").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let body = json_of(&body);
        assert_eq!(body["error"], json!("Proxy error"));
        assert_eq!(body["method"], json!("DELETE"));
        assert_eq!(body["targetUrl"], json!("http://127.0.0.1:1/clima"));
    }

    #[tokio::test]
    async fn should_follow_an_allowed_url_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/foo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("overridden"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(ProxyConfig {
            base_url: Some(Url::parse("http://127.0.0.1:1").unwrap()),
            url_override: UrlOverridePolicy::AnyHost,
            ..ProxyConfig::default()
        });

        let target = format!("{}/foo", mock_server.uri());
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("url", &target)
            .finish();

        let (status, body) = send(
            &gateway.app,
            Request::get(format!("/api/hf?{query}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Bytes::from("overridden"));
    }

    #[tokio::test]
    async fn should_refuse_a_url_override_when_disabled() {
        let mock_server = MockServer::start().await;
        let gateway = gateway(config_for(&mock_server));

        let (status, _) = send(
            &gateway.app,
            Request::get("/api/hf?url=http%3A%2F%2F169.254.169.254%2Flatest")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_the_upstream_prediction_when_available() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clima"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "temp_max": 27.0, "model_version": "remote-3" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let (status, body) = send(
            &gateway.app,
            Request::post("/api/weather")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"latitude":19.4,"longitude":-99.1,"day":15,"month":6,"year":2025}"#,
                ))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body),
            json!({ "temp_max": 27.0, "model_version": "remote-3" })
        );

        let received = mock_server.received_requests().await.unwrap();
        let forwarded: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(forwarded["latitude"], json!(19.4));
        assert_eq!(forwarded["month"], json!(6));
    }

    #[tokio::test]
    async fn should_simulate_when_the_upstream_model_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let gateway = gateway(config_for(&mock_server));

        let (status, body) = send(
            &gateway.app,
            Request::post("/api/weather")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"latitude":40.4,"longitude":-3.7,"month":1}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let body = json_of(&body);
        assert_eq!(body["model_version"], json!("sim-fallback-1.0.0"));
        assert_eq!(body["location"]["year"], json!(2025));
        assert!(body["temp_max"].as_f64().unwrap() > body["temp_min"].as_f64().unwrap());
    }

    #[tokio::test]
    async fn should_simulate_without_any_upstream_configured() {
        let gateway = gateway(ProxyConfig::default());

        let (status, body) = send(
            &gateway.app,
            Request::post("/api/weather")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["model_version"], json!("sim-fallback-1.0.0"));
    }

    #[tokio::test]
    async fn should_keep_the_last_weather_on_disk() {
        let gateway = gateway(ProxyConfig::default());

        let (status, _) = send(
            &gateway.app,
            Request::get("/api/weather/last").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &gateway.app,
            Request::post("/api/weather/last")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"temp_max":22.5,"city":"Lima"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({ "success": true }));

        let (status, body) = send(
            &gateway.app,
            Request::get("/api/weather/last").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({ "temp_max": 22.5, "city": "Lima" }));
    }
}
