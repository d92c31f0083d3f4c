use pretty_assertions::assert_eq;
use serde_json::json;
use strata::{initialize, Backend, Descriptor, Model, Params};

fn config_error(params: serde_json::Value) -> String {
    match initialize(&params) {
        Ok(backend) => panic!("expected a configuration error; backend={backend:?}"),
        Err(err) => {
            assert!(err.is_configuration(), "{err}");
            err.to_string()
        }
    }
}

#[test]
fn params_are_required() {
    assert_eq!(
        config_error(json!(null)),
        "configuration error: params must be defined"
    );
    assert_eq!(
        config_error(json!("mysql")),
        "configuration error: params must be defined"
    );
}

#[test]
fn client_is_required() {
    assert_eq!(
        config_error(json!({ "host": "localhost" })),
        "configuration error: client property must be defined"
    );
    assert_eq!(
        config_error(json!({ "client": null, "host": "localhost" })),
        "configuration error: client property must be defined"
    );
    assert_eq!(
        config_error(json!({ "client": "", "host": "localhost" })),
        "configuration error: client property must be defined"
    );
}

#[test]
fn client_must_be_known() {
    for client in [json!("postgres"), json!(true), json!(["es"])] {
        assert_eq!(
            config_error(json!({ "client": client })),
            "configuration error: client must be \"es, mongo or mysql\""
        );
    }
}

#[tokio::test]
async fn each_client_builds_its_backend() {
    let mysql = initialize(&json!({
        "client": "mysql",
        "host": "localhost",
        "port": 3306,
        "db": "testMySqlModel",
        "uid": "dbuser",
        "pwd": "dbuser",
    }))
    .unwrap();
    assert_eq!(mysql.client_name(), "mysql");
    assert!(mysql.as_mysql().is_some());
    assert!(mysql.as_mongo().is_none());

    let mongo = initialize(&json!({
        "client": "mongo",
        "host": "localhost",
        "port": "27017",
        "db": "functionaltest",
    }))
    .unwrap();
    assert_eq!(mongo.client_name(), "mongo");

    let es = initialize(&json!({
        "client": "es",
        "host": "localhost",
        "port": 9200,
        "log": "trace",
    }))
    .unwrap();
    assert_eq!(es.client_name(), "es");
    assert!(es.as_es().is_some());
}

#[tokio::test]
async fn models_are_validated_per_backend() {
    let backend = Backend::from_params(Params::from_url("elasticsearch://localhost:9200").unwrap())
        .unwrap();

    let err = backend.extend(Descriptor::new("users")).unwrap_err();
    assert_eq!(err.to_string(), "configuration error: tableType must be defined");

    let model = backend
        .extend(Descriptor::new("users").with_table_type("test"))
        .unwrap();
    assert_eq!(model.descriptor().table_name(), "users");

    let backend = strata::connect("mongodb://localhost:27017/functionaltest").unwrap();
    let err = backend.extend(Descriptor::new(" ")).unwrap_err();
    assert_eq!(err.to_string(), "configuration error: tableName must be defined");
}
