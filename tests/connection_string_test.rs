use lib::config::postgres::{load_from_iter, ConnectionConfig};
use lib::connection::build;

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn fully_defaulted_environment() {
    let config = load_from_iter(env(&[])).unwrap();

    assert_eq!(
        build(&config),
        "host=localhost port=5432 user=postgres dbname=akinweb sslmode=disable"
    );
}

#[test]
fn production_like_environment() {
    let config = load_from_iter(env(&[
        ("DB_HOST", "db.internal"),
        ("DB_PORT", "5432"),
        ("DB_USER", "app"),
        ("DB_PASSWORD", "s3cr3t"),
        ("DB_NAME", "prod"),
    ]))
    .unwrap();

    assert_eq!(
        build(&config),
        "host=db.internal port=5432 user=app password=s3cr3t dbname=prod sslmode=disable"
    );
}

#[test]
fn blank_password_is_omitted() {
    let config = load_from_iter(env(&[("DB_USER", "app"), ("DB_PASSWORD", "")])).unwrap();
    let conn_str = build(&config);

    assert!(!conn_str.contains("password"));
    assert_eq!(
        conn_str,
        "host=localhost port=5432 user=app dbname=akinweb sslmode=disable"
    );
}

#[test]
fn shape_holds_across_configs() {
    let configs = vec![
        ConnectionConfig::default(),
        ConnectionConfig {
            password: "pw".to_string(),
            ..Default::default()
        },
        ConnectionConfig {
            host: "10.0.0.7".to_string(),
            port: "6543".to_string(),
            user: "reader".to_string(),
            password: "p=ss".to_string(),
            dbname: "analytics".to_string(),
        },
    ];

    for config in configs {
        let conn_str = build(&config);

        assert!(conn_str.starts_with("host="));
        assert!(conn_str.ends_with("sslmode=disable"));
        assert!(!conn_str.contains("  "));

        let keys: Vec<&str> = conn_str
            .split(' ')
            .map(|pair| pair.split('=').next().unwrap())
            .collect();

        if config.password.is_empty() {
            assert_eq!(keys, ["host", "port", "user", "dbname", "sslmode"]);
        } else {
            assert_eq!(
                keys,
                ["host", "port", "user", "password", "dbname", "sslmode"]
            );
            let segment = format!("password={}", config.password);
            assert_eq!(conn_str.matches(&segment).count(), 1);
        }
    }
}
